use std::io::Read;

use serde::Serialize;

use crate::cmd::DecodeArgs;
use crate::exit::{io_error, serialize_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{print_json, print_raw, print_table, OutputFormat};

#[derive(Debug, Serialize)]
struct DecodeOutput {
    route: String,
    message_type: String,
    payload_size: usize,
    value: String,
}

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let serializer = args.catalog.load_serializer()?;
    let payload = read_payload(&args)?;

    let message = serializer
        .unmarshal_route(&args.route, &payload)
        .map_err(|err| serialize_error("decode", err))?;

    let message_type = serializer
        .message_type_name(&message)
        .ok_or_else(|| CliError::new(INTERNAL, "decoded value is not registered"))?
        .to_string();
    let value = serializer.describe(&message).unwrap_or_default();
    tracing::debug!(route = %args.route, %message_type, size = payload.len(), "decoded payload");

    let output = DecodeOutput {
        route: args.route,
        message_type,
        payload_size: payload.len(),
        value,
    };

    match format {
        OutputFormat::Json => print_json(&output),
        OutputFormat::Table => print_table(
            &["ROUTE", "TYPE", "SIZE", "VALUE"],
            vec![vec![
                output.route.clone(),
                output.message_type.clone(),
                output.payload_size.to_string(),
                output.value.clone(),
            ]],
        ),
        OutputFormat::Pretty => println!(
            "route={} type={} size={} value={}",
            output.route, output.message_type, output.payload_size, output.value
        ),
        OutputFormat::Raw => {
            print_raw(output.value.as_bytes());
            println!();
        }
    }

    Ok(SUCCESS)
}

fn read_payload(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    match &args.file {
        Some(path) => std::fs::read(path)
            .map_err(|err| io_error(&format!("read {}", path.display()), err)),
        None => {
            let mut payload = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut payload)
                .map_err(|err| io_error("read stdin", err))?;
            Ok(payload)
        }
    }
}
