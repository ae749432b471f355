//! The `list` command: one page of the saved forms.

use std::fmt::Write as _;

use async_trait::async_trait;
use formforge_core::utils::text::truncate_chars;
use formforge_core::{FormForgeError, Settings};
use formforge_store::LocalStore;

use super::load_store;
use crate::command::ManagementCommand;

const TITLE_WIDTH: usize = 40;

/// Lists saved forms, newest last, a page at a time.
pub struct ListCommand;

/// Renders page `number` of the store's forms. A page past the end shows the
/// last page instead.
pub fn render_page(store: &LocalStore, number: usize, per_page: usize) -> String {
    if store.is_empty() {
        return "No forms yet. Create one with `formforge create <TITLE>`.\n".to_string();
    }

    let page = store.page_or_last(number, per_page);
    let mut out = String::new();
    for form in page.items() {
        let _ = writeln!(
            out,
            "{}  {:<width$}  {}",
            form.id,
            truncate_chars(&form.title, TITLE_WIDTH),
            form.updated_at.format("%Y-%m-%d %H:%M"),
            width = TITLE_WIDTH,
        );
    }
    let _ = writeln!(
        out,
        "Page {} of {} ({} forms)",
        page.number(),
        page.num_pages(),
        store.len()
    );
    out
}

#[async_trait]
impl ManagementCommand for ListCommand {
    fn name(&self) -> &'static str {
        "list"
    }

    fn help(&self) -> &'static str {
        "List saved forms"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("page")
                .long("page")
                .short('p')
                .value_parser(clap::value_parser!(usize))
                .default_value("1")
                .help("Page number to show"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), FormForgeError> {
        let store = load_store(settings).await?;
        let number = matches.get_one::<usize>("page").copied().unwrap_or(1);
        print!("{}", render_page(&store, number, settings.items_per_page));
        Ok(())
    }
}
