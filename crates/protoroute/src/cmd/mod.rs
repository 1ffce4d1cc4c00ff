use clap::{Args, Subcommand};
use std::path::PathBuf;

use protoroute_serialize::{CatalogConfig, SchemaCatalog, Serializer};

use crate::exit::{serialize_error, CliResult};
use crate::output::OutputFormat;

pub mod check;
pub mod decode;
pub mod routes;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List routes and the message types they map to.
    Routes(RoutesArgs),
    /// Validate the mapping strictly against the schema.
    Check(CheckArgs),
    /// Decode a payload as the message type of a route.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Routes(args) => routes::run(args, format),
        Command::Check(args) => check::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Schema and mapping sources shared by every catalog command.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Protobuf schema file.
    #[arg(long, value_name = "FILE", env = "PROTOROUTE_SCHEMA")]
    pub schema: PathBuf,
    /// JSON route mapping file.
    #[arg(long, value_name = "FILE", env = "PROTOROUTE_MAPPING")]
    pub mapping: PathBuf,
}

impl CatalogArgs {
    pub fn load_catalog(&self, config: CatalogConfig) -> CliResult<SchemaCatalog> {
        SchemaCatalog::from_files_with_config(&self.schema, &self.mapping, config)
            .map_err(|err| serialize_error("load catalog", err))
    }

    pub fn load_serializer(&self) -> CliResult<Serializer> {
        let catalog = self.load_catalog(CatalogConfig::default())?;
        Ok(Serializer::builder().build_with_catalog(catalog))
    }
}

#[derive(Args, Debug)]
pub struct RoutesArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
    /// Skip checking that mapped types are declared in the schema.
    #[arg(long)]
    pub allow_undeclared: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
    /// Route whose server-side type the payload is decoded as.
    #[arg(long, short = 'r')]
    pub route: String,
    /// Read the payload from a file instead of stdin.
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
