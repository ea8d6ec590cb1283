//! Example 01: Basic CRUD Operations
//!
//! Demonstrates the five facade operations against a file-backed store.
//!
//! Run with: cargo run --example 01_basic_crud

use eyre::Result;
use todostore::TodoStore;

fn main() -> Result<()> {
    // Create a temporary directory for this example
    let temp_dir = tempfile::tempdir()?;
    let store_path = temp_dir.path().to_path_buf();

    println!("TodoStore Basic CRUD Example");
    println!("============================\n");
    println!("Store path: {}\n", store_path.display());

    // Open the store; the database itself materializes lazily on first use
    let store = TodoStore::open(&store_path)?;
    store.init()?;
    println!("Store initialized.\n");

    // ADD
    println!("1. ADD - Creating tasks...");
    let milk = store.add_task("Buy milk")?;
    let taxes = store.add_task("File taxes")?;
    println!("   Added task {} - {}", milk.id, milk.title);
    println!("   Added task {} - {}\n", taxes.id, taxes.title);

    // LIST
    println!("2. LIST - Newest first...");
    for task in store.list_tasks()? {
        let marker = if task.completed { "x" } else { " " };
        println!("   [{marker}] {} {}", task.id, task.title);
    }
    println!();

    // UPDATE
    println!("3. UPDATE - Renaming a task...");
    store.update_task(milk.id, "Buy oat milk")?;
    println!("   Task {} renamed.\n", milk.id);

    // TOGGLE
    println!("4. TOGGLE - Completing a task...");
    store.toggle_complete(taxes.id, true)?;
    println!("   Task {} completed.\n", taxes.id);

    // DELETE
    println!("5. DELETE - Removing a task...");
    store.delete_task(milk.id)?;
    println!("   Task {} deleted.\n", milk.id);

    println!("Final state:");
    for task in store.list_tasks()? {
        let marker = if task.completed { "x" } else { " " };
        println!("   [{marker}] {} {}", task.id, task.title);
    }

    println!("\nExample complete!");
    Ok(())
}
