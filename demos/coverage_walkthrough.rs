//! Coverage Walkthrough
//!
//! Demonstrates:
//! - Building regions from item filters, precisely and approximately
//! - Recording synchronized regions in a coverage registry
//! - Answering "is this query already synchronized?"
//! - Invalidating coverage after a remote change
//!
//! Run with: cargo run --example coverage_walkthrough

use syncube::constraints::ConstraintNode;
use syncube::region::utils;
use syncube::{Axis, CoverageRegistry, CubeRegistry, RegionBuilder};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("syncube=debug")
        .init();

    println!("=== Coverage Walkthrough ===\n");

    let project = Axis::named("project", "Project");
    let status = Axis::named("status", "Status");
    let priority = Axis::named("priority", "Priority");
    let builder = RegionBuilder::new();

    // ========================================
    // 1. Build Regions From Filters
    // ========================================
    println!("1. Building regions...");

    let open_in_project = ConstraintNode::intersection(vec![
        ConstraintNode::equals(project.clone(), 10),
        ConstraintNode::any_of(status.clone(), [1, 2, 3]),
    ]);
    let Some(synced) = builder.build(&open_in_project, true) else {
        println!("   filter has no precise region");
        return;
    };
    println!("   {}  =>  {}", open_in_project.stringify(), synced);

    let high_priority = ConstraintNode::intersection(vec![
        ConstraintNode::equals(project.clone(), 10),
        ConstraintNode::equals(status.clone(), 2),
        ConstraintNode::range(priority.clone(), 1, 2),
    ]);
    let precise = builder.build(&high_priority, true);
    let approximate = builder.build(&high_priority, false);
    println!("   {}", high_priority.stringify());
    println!("     precise:     {:?}", precise.map(|r| r.to_string()));
    println!("     approximate: {:?}\n", approximate.as_ref().map(|r| r.to_string()));

    // ========================================
    // 2. Record Coverage
    // ========================================
    println!("2. Recording coverage...");

    let mut scoped = synced.copy();
    utils::adjust_for_connection(&mut scoped, 1);
    let mut registry = CubeRegistry::new();
    registry.set_synced(&scoped);
    println!("   stored {} cube(s)\n", registry.len());

    // ========================================
    // 3. Query Coverage
    // ========================================
    println!("3. Querying coverage...");

    if let Some(mut query) = approximate {
        utils::adjust_for_connection(&mut query, 1);
        println!("   {} synced: {}", query, registry.is_synced(&query));
    }

    let mut other_project = utils::connection_region(1);
    other_project.add_included(&project, [11]);
    println!("   {} synced: {}\n", other_project, registry.is_synced(&other_project));

    // ========================================
    // 4. Invalidate Coverage
    // ========================================
    println!("4. Invalidating coverage...");

    let mut changed = utils::connection_region(1);
    changed.add_included(&status, [3]);
    let removed = registry.set_unsynced(&changed);
    println!("   {} removed coverage: {}", changed, removed);
    println!("   stored {} cube(s)", registry.len());

    println!("\n=== Walkthrough Complete ===");
}
