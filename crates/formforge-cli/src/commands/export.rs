//! The `export` command: writes a form as JSON or static HTML.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use formforge_core::{FormForgeError, FormForgeResult, Settings};
use formforge_forms::export::{export_file_name, render, ExportFormat, HtmlExporter};
use formforge_store::LocalStore;

use super::{form_id_arg, load_store, string_arg};
use crate::command::ManagementCommand;

/// Exports a form to a file.
pub struct ExportCommand;

/// Renders form `form_id` in `format` and writes it to `output`, or to
/// `<export_dir>/<slug>.<ext>` when no output path is given. Returns the path
/// written.
pub async fn export_form(
    store: &LocalStore,
    form_id: &str,
    format: ExportFormat,
    output: Option<&Path>,
    settings: &Settings,
) -> FormForgeResult<PathBuf> {
    let document = store.document(form_id)?;
    let exporter = HtmlExporter::new().with_stylesheet(settings.stylesheet_href.as_str());
    let contents = render(document, format, &exporter)?;

    let path = output.map_or_else(
        || settings.export_dir.join(export_file_name(&document.title, format)),
        Path::to_path_buf,
    );
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, contents).await?;

    tracing::info!(
        form = form_id,
        %format,
        path = %path.display(),
        elements = document.len(),
        "exported form"
    );
    Ok(path)
}

#[async_trait]
impl ManagementCommand for ExportCommand {
    fn name(&self) -> &'static str {
        "export"
    }

    fn help(&self) -> &'static str {
        "Export a form as JSON or static HTML"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(form_id_arg())
            .arg(
                clap::Arg::new("format")
                    .long("format")
                    .short('f')
                    .default_value("json")
                    .value_parser(["json", "html"])
                    .help("Output format"),
            )
            .arg(
                clap::Arg::new("output")
                    .long("output")
                    .short('o')
                    .value_name("PATH")
                    .value_parser(clap::value_parser!(PathBuf))
                    .help("Output file (default: <export_dir>/<form-title>.<ext>)"),
            )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), FormForgeError> {
        let format: ExportFormat = string_arg(matches, "format")?.parse()?;
        let output = matches.get_one::<PathBuf>("output").map(PathBuf::as_path);

        let store = load_store(settings).await?;
        let path = export_form(&store, string_arg(matches, "form")?, format, output, settings).await?;
        println!("{}", path.display());
        Ok(())
    }
}
