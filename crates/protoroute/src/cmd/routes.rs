use serde::Serialize;

use protoroute_serialize::Serializer;

use crate::cmd::RoutesArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, print_table, yes_no, OutputFormat};

#[derive(Debug, Serialize)]
struct RouteRow {
    route: String,
    server: String,
    client: Option<String>,
    declared: bool,
    registered: bool,
}

#[derive(Debug, Serialize)]
struct RoutesOutput {
    package: Option<String>,
    routes: Vec<RouteRow>,
}

pub fn run(args: RoutesArgs, format: OutputFormat) -> CliResult<i32> {
    let serializer = args.catalog.load_serializer()?;
    let output = collect(&serializer);
    tracing::debug!(routes = output.routes.len(), "listing routes");

    match format {
        OutputFormat::Json => print_json(&output),
        OutputFormat::Table => print_table(
            &["ROUTE", "SERVER", "CLIENT", "DECLARED", "REGISTERED"],
            output
                .routes
                .iter()
                .map(|row| {
                    vec![
                        row.route.clone(),
                        row.server.clone(),
                        row.client.clone().unwrap_or_else(|| "-".to_string()),
                        yes_no(row.declared).to_string(),
                        yes_no(row.registered).to_string(),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Pretty => {
            for row in &output.routes {
                println!(
                    "{} -> {} (declared={}, registered={})",
                    row.route,
                    row.server,
                    yes_no(row.declared),
                    yes_no(row.registered)
                );
            }
        }
        OutputFormat::Raw => {
            for row in &output.routes {
                println!("{}", row.route);
            }
        }
    }

    Ok(SUCCESS)
}

fn collect(serializer: &Serializer) -> RoutesOutput {
    let catalog = serializer.catalog();
    let routes = catalog
        .routes()
        .map(|(route, descriptor)| RouteRow {
            route: route.to_string(),
            server: descriptor.server.clone(),
            client: descriptor.client.clone(),
            declared: descriptor
                .message_types()
                .all(|type_name| catalog.declares(type_name)),
            registered: serializer.registry().contains(&descriptor.server),
        })
        .collect();

    RoutesOutput {
        package: catalog.package().map(str::to_string),
        routes,
    }
}
