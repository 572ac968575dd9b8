//! Handler for `kondi report`.

use kondi_resolver::resolver::Resolution;
use miette::Result;

pub fn exec(resolution: &Resolution) -> Result<()> {
    print!("{}", resolution.report);
    for (deployment, extension) in resolution.deployment.deployments() {
        println!("Deployment {deployment} for {extension}");
    }
    Ok(())
}
