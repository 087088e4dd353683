//! Blocks command

use colored::Colorize;
use tp_blocks::BlockRegistry;

use crate::error::Result;

/// Run the blocks command, listing what the codec is configured with.
pub fn run_blocks(registry: &BlockRegistry) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "Registered Blocks".bold()));
    for block in registry.blocks() {
        out.push_str(&format!("  {}\n", block.green()));
        for rule in registry.rewrite_rules(block) {
            out.push_str(&format!(
                "    {} {} -> {}\n",
                "rewrite".dimmed(),
                rule.marker,
                rule.replacement
            ));
        }
    }

    out.push_str(&format!("\n{}\n", "Global Fields".bold()));
    for field in registry.global_fields() {
        out.push_str(&format!("  {}\n", field.cyan()));
    }

    out.push_str(&format!(
        "\n{} {} blocks registered.",
        "Total:".dimmed(),
        registry.blocks().count()
    ));

    Ok(out)
}
