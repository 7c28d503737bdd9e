use crate::output::write_json;
use chanscope_api::AsyncApiDocket;
use std::path::Path;

pub fn run(output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let schema = schemars::schema_for!(AsyncApiDocket);
    write_json(&schema, output, true)
}
