use serde::Serialize;

use protoroute_serialize::CatalogConfig;

use crate::cmd::CheckArgs;
use crate::exit::{CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Debug, Serialize)]
struct CheckOutput {
    valid: bool,
    routes: usize,
    messages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let config = CatalogConfig {
        strict_mapping: true,
        require_declared_types: !args.allow_undeclared,
    };

    let output = match args.catalog.load_catalog(config) {
        Ok(catalog) => CheckOutput {
            valid: true,
            routes: catalog.route_names().len(),
            messages: catalog.declared_messages().count(),
            error: None,
        },
        Err(err) if err.code == DATA_INVALID => {
            tracing::warn!(error = %err, "catalog check failed");
            CheckOutput {
                valid: false,
                routes: 0,
                messages: 0,
                error: Some(err.message),
            }
        }
        Err(err) => return Err(err),
    };

    print_check(&output, format);

    if output.valid {
        Ok(SUCCESS)
    } else {
        Ok(DATA_INVALID)
    }
}

fn print_check(output: &CheckOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(output),
        OutputFormat::Table | OutputFormat::Pretty => {
            if output.valid {
                println!(
                    "catalog ok: {} routes, {} messages",
                    output.routes, output.messages
                );
            } else {
                println!(
                    "catalog invalid: {}",
                    output.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
        OutputFormat::Raw => println!("{}", if output.valid { "ok" } else { "invalid" }),
    }
}

