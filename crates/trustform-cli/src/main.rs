//! Trustform - turns trust documents into schema-complete structured records.

use clap::Parser;
use std::io::Read;
use trustform_cli::{pipeline, resources, Cli, CliError, ProcessRequest, ProcessResponse};
use trustform_extract::{prewarm_dns, RemoteExtractor};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let response = run(&cli).unwrap_or_else(|e| {
        ProcessResponse::failure(e.to_string(), e.kind(), Some(format!("{:?}", e)))
    });

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&response)
    } else {
        serde_json::to_string(&response)
    };
    match rendered {
        Ok(json) => println!("{}", json),
        Err(e) => {
            // Should not happen; keep the boundary contract anyway.
            println!(
                "{{\"error\": \"response serialization failed: {}\", \"type\": \"SerializationError\"}}",
                e
            );
        }
    }
}

fn run(cli: &Cli) -> Result<ProcessResponse, CliError> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let request: ProcessRequest =
        serde_json::from_str(&input).map_err(CliError::RequestParse)?;

    let schema = resources::load_schema(cli.template.as_deref())?;
    let params = resources::load_params(cli.params.as_deref())?;
    let exemplars = resources::load_exemplars(cli.exemplars.as_deref())?;

    prewarm_dns(&cli.endpoint);
    let engine = RemoteExtractor::new(&cli.endpoint, params.clone(), exemplars)?;

    Ok(pipeline::process(&engine, &schema, &params, &request))
}
