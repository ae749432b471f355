//! The `catalog` command: lists the element types that can be added.

use std::fmt::Write as _;

use async_trait::async_trait;
use formforge_core::{FormForgeError, FormForgeResult, Settings};
use formforge_forms::catalog::categories;

use crate::command::ManagementCommand;

/// Prints the element catalog grouped by category.
pub struct CatalogCommand;

/// Renders the catalog as an indented listing or as JSON.
pub fn render_catalog(json: bool) -> FormForgeResult<String> {
    let categories = categories();
    if json {
        return Ok(serde_json::to_string_pretty(&categories)?);
    }

    let mut out = String::new();
    for category in &categories {
        let _ = writeln!(out, "{}", category.name);
        for template in &category.elements {
            let _ = writeln!(out, "  {:<15} {}", template.element_type.tag(), template.label);
        }
    }
    Ok(out)
}

#[async_trait]
impl ManagementCommand for CatalogCommand {
    fn name(&self) -> &'static str {
        "catalog"
    }

    fn help(&self) -> &'static str {
        "List the element types that can be added to a form"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("json")
                .long("json")
                .action(clap::ArgAction::SetTrue)
                .help("Print the catalog as JSON"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        _settings: &Settings,
    ) -> Result<(), FormForgeError> {
        print!("{}", render_catalog(matches.get_flag("json"))?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_listing() {
        let out = render_catalog(false).unwrap();
        assert!(out.starts_with("Layout Elements\n"));
        assert!(out.contains("  single-line     Single Line\n"));
        assert!(out.contains("Date Elements\n"));
    }

    #[test]
    fn test_json_listing() {
        let out = render_catalog(true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["id"], "layout");
        assert_eq!(value[2]["elements"][0]["type"], "checklist");
    }
}
