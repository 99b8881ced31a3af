use std::env;
use std::fs;
use std::path::Path;
use std::process;

use template_preview::{
    render_with_options, DataRecord, PreviewError, RenderOptions, ScopeId,
};

const DEFAULT_SCOPE_ID: &str = "preview";

struct Args {
    template: String,
    data: Option<String>,
    scope_id: String,
    options: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match parse_args(env::args().skip(1).collect()) {
        Some(args) => args,
        None => {
            print_usage();
            process::exit(1);
        }
    };

    match run(&args) {
        Ok(html) => println!("{}", html),
        Err(e) => {
            eprintln!("✗ {} could not be rendered:", args.template);
            print_error(&e);
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: render-preview <template.html> [data.json|data.yaml] [--scope <id>] [--options <options.yaml>]");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  render-preview contract.html");
    eprintln!("  render-preview contract.html client.json --scope contract-preview");
    eprintln!("  RUST_LOG=debug render-preview proposal.html sample.yaml --options strict.yaml");
}

fn parse_args(raw: Vec<String>) -> Option<Args> {
    let mut positional = Vec::new();
    let mut scope_id = DEFAULT_SCOPE_ID.to_string();
    let mut options = None;

    let mut iter = raw.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--scope" => scope_id = iter.next()?,
            "--options" => options = Some(iter.next()?),
            "-h" | "--help" => return None,
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let template = positional.next()?;
    let data = positional.next();
    if positional.next().is_some() {
        return None;
    }

    Some(Args {
        template,
        data,
        scope_id,
        options,
    })
}

fn run(args: &Args) -> Result<String, PreviewError> {
    let template = read(&args.template)?;
    let scope_id = ScopeId::new(args.scope_id.as_str())?;

    let data = match &args.data {
        Some(path) => load_data(path)?,
        None => DataRecord::new(),
    };

    let options = match &args.options {
        Some(path) => RenderOptions::from_yaml_str(&read(path)?)?,
        None => RenderOptions::default(),
    };

    Ok(render_with_options(&template, &data, &scope_id, &options).into_string())
}

fn read(path: &str) -> Result<String, PreviewError> {
    fs::read_to_string(path)
        .map_err(|e| PreviewError::InvalidInput(format!("Failed to read {}: {}", path, e)))
}

/// JSON unless the extension says YAML
fn load_data(path: &str) -> Result<DataRecord, PreviewError> {
    let content = read(path)?;
    let is_yaml = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        DataRecord::from_yaml_str(&content)
    } else {
        DataRecord::from_json_str(&content)
    }
}

fn print_error(error: &PreviewError) {
    match error {
        PreviewError::InvalidScopeId { id } => {
            eprintln!("  Invalid scope id '{}':", id);
            eprintln!("    Use a CSS identifier such as 'contract-preview'");
        }
        PreviewError::Json(msg) => {
            eprintln!("  JSON error:");
            eprintln!("    {}", msg);
        }
        PreviewError::Yaml(msg) => {
            eprintln!("  YAML error:");
            eprintln!("    {}", msg);
        }
        e => {
            eprintln!("  {}", e);
        }
    }
}
