//! Replays a keypad script and prints every step
//!
//! Run with: cargo run -p keycalc --example replay -- "12.5 +/- * 4 ="

use keycalc::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let script = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "5+3*2=".to_string());

    let mut session = Session::new();
    session.run_script(&script)?;

    println!("{}", session.export_formatted());
    println!("----");
    println!("{}", session.display());
    Ok(())
}
