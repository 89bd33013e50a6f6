use anyhow::Result;
use pictogram_core::icon::{IconCatalog, search_icons};

use super::output::print_json;

pub fn run(query: &str, json: bool) -> Result<()> {
    let results = search_icons(IconCatalog::builtin(), query);
    if json {
        return print_json(&results);
    }
    if results.is_empty() {
        eprintln!("No icons match '{query}'");
    }
    for hit in &results {
        println!("{:>4}  {}:{}", hit.score, hit.collection, hit.icon_name);
    }
    Ok(())
}
