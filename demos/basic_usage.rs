//! Basic usage example for dep-registry.
//!
//! Demonstrates:
//! - Registering custom structs and newtype-wrapped scalars
//! - Copying values out with `get()` and sharing them with `get_shared()`
//! - Checking registration status with `has()`
//! - The errors for primitives, double registration and missing types
//!
//! Run with: `cargo run --example basic_usage`

use dep_registry::define_registry;
use std::sync::Arc;

// Create an isolated registry for this example
define_registry!(app);

#[derive(Debug, Clone, Default, PartialEq)]
struct AppConfig {
    name: String,
    version: u32,
    debug_mode: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Greeting(String);

fn main() -> Result<(), dep_registry::RegistryError> {
    println!("=== dep-registry: Basic Usage ===\n");

    // -------------------------------------------------------------------------
    // 1. Register a custom struct and a wrapped String
    // -------------------------------------------------------------------------
    println!("1. Registering values...");

    app::register(AppConfig {
        name: "MyApp".to_string(),
        version: 1,
        debug_mode: true,
    })?;
    app::register(Greeting("Hello, dep-registry!".to_string()))?;

    println!("   Registered: AppConfig, Greeting");

    // -------------------------------------------------------------------------
    // 2. Bare primitives are refused
    // -------------------------------------------------------------------------
    println!("\n2. Registering a bare String...");

    match app::register("just a string".to_string()) {
        Ok(()) => println!("   Unexpectedly registered"),
        Err(e) => println!("   Error (expected): {}", e),
    }

    // -------------------------------------------------------------------------
    // 3. A type can only be registered once
    // -------------------------------------------------------------------------
    println!("\n3. Registering AppConfig again...");

    match app::register(AppConfig::default()) {
        Ok(()) => println!("   Unexpectedly registered"),
        Err(e) => println!("   Error (expected): {}", e),
    }

    // -------------------------------------------------------------------------
    // 4. Check registration status with has()
    // -------------------------------------------------------------------------
    println!("\n4. Checking registration status with has()...");

    println!("   has::<AppConfig>() = {}", app::has::<AppConfig>()?);
    println!("   has::<Greeting>()  = {}", app::has::<Greeting>()?);
    println!("   has::<Vec<u8>>()   = {}", app::has::<Vec<u8>>()?);

    // -------------------------------------------------------------------------
    // 5. Copy values out with get()
    // -------------------------------------------------------------------------
    println!("\n5. Copying values with get(&mut dest)...");

    let mut cfg = AppConfig::default();
    app::get(&mut cfg)?;
    println!("   AppConfig: {:?}", cfg);

    // -------------------------------------------------------------------------
    // 6. Share the stored instance with get_shared()
    // -------------------------------------------------------------------------
    println!("\n6. Sharing values with get_shared() -> Arc<T>...");

    let greeting: Arc<Greeting> = app::get_shared()?;
    println!("   Greeting: {}", greeting.0);

    // -------------------------------------------------------------------------
    // 7. Missing types and cleanup
    // -------------------------------------------------------------------------
    println!("\n7. Handling missing types...");

    match app::get_cloned::<Vec<u8>>() {
        Ok(value) => println!("   Found Vec<u8>: {:?}", value),
        Err(e) => println!("   Error (expected): {}", e),
    }

    app::delete::<Greeting>()?;
    app::delete::<Greeting>()?;
    println!("   Deleted Greeting twice; has::<Greeting>() = {}", app::has::<Greeting>()?);

    println!("\n=== Example Complete ===");
    Ok(())
}
