//! Example 02: Persistence Round-Trip
//!
//! Every mutation re-exports the whole database image to the byte store.
//! This example drops the first store instance entirely and shows a second
//! one restoring the exact same state, including the id sequence.
//!
//! Run with: cargo run --example 02_persistence_roundtrip

use eyre::Result;
use todostore::TodoStore;

fn main() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let store_path = temp_dir.path().to_path_buf();

    println!("TodoStore Persistence Round-Trip Example");
    println!("========================================\n");

    // First session: build up some state, then go away
    {
        let store = TodoStore::open(&store_path)?;
        store.add_task("Water plants")?;
        store.add_task("Call dentist")?;
        store.toggle_complete(1, true)?;
        store.delete_task(2)?;
        println!("First session wrote 2 tasks, completed one, deleted one.");
    }

    // Second session: a brand-new process would see exactly this
    let store = TodoStore::open(&store_path)?;
    println!("\nSecond session restored from the stored image:");
    for task in store.list_tasks()? {
        let marker = if task.completed { "x" } else { " " };
        println!("   [{marker}] {} {}", task.id, task.title);
    }

    // Ids assigned by the first session are never reused
    let next = store.add_task("Buy stamps")?;
    println!("\nNext task got id {} (id 2 was deleted, never reused).", next.id);

    println!("\nExample complete!");
    Ok(())
}
