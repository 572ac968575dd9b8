//! Handler for `kondi flags`.

use kondi_resolver::resolver::Resolution;
use miette::Result;

pub fn exec(resolution: &Resolution, deployment: bool) -> Result<()> {
    let graph = if deployment {
        resolution.deployment.graph()
    } else {
        &resolution.runtime
    };

    if graph.is_empty() {
        println!("No artifacts.");
        return Ok(());
    }

    let width = graph
        .artifacts()
        .map(|(c, _)| c.to_string().len())
        .max()
        .unwrap_or(0);
    for (coords, flags) in graph.artifacts() {
        let coords = coords.to_string();
        println!("{coords:<width$}  {flags}");
    }
    Ok(())
}
