//! Operator listing

use anyhow::Result;
use slothtools_ops::OperatorRegistry;

pub fn execute() -> Result<()> {
    let registry = OperatorRegistry::new();
    let mut section = "";
    for op in registry.iter() {
        if op.section() != section {
            section = op.section();
            println!("{}", section);
        }
        println!("  {:<45} {}", op.id(), op.label());
    }
    Ok(())
}
