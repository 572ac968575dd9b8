//! Handler for `kondi tree`.

use kondi_resolver::resolver::Resolution;
use miette::Result;

pub fn exec(
    resolution: &Resolution,
    depth: Option<usize>,
    deployment: bool,
    inverted: bool,
    why: Option<&str>,
) -> Result<()> {
    let graph = if deployment {
        resolution.deployment.graph()
    } else {
        &resolution.runtime
    };

    // --inverted --why X: dependents of X
    if let (true, Some(target)) = (inverted, why) {
        let output = graph.print_inverted_tree(target);
        if output.is_empty() {
            println!("Artifact '{target}' not found in the graph.");
        } else {
            print!("{output}");
        }
        return Ok(());
    }

    if let Some(target) = why {
        match graph.find_path(target) {
            Some(path) => {
                println!("Path to {target}:");
                for (i, node) in path.iter().enumerate() {
                    let indent = "  ".repeat(i);
                    println!("{indent}{node}");
                }
            }
            None => {
                println!("Artifact '{target}' not found in the graph.");
                let excluded = resolution
                    .report
                    .excluded
                    .iter()
                    .chain(&resolution.report.dev_scoped)
                    .filter(|e| e.to.artifact_id == target || e.to.to_string() == target);
                for edge in excluded {
                    println!("Excluded: {edge}");
                }
            }
        }
        return Ok(());
    }

    if inverted {
        if graph.is_empty() {
            println!("No dependencies.");
        }
        for (coords, _) in graph.artifacts() {
            print!("{}", graph.print_inverted_tree(&coords.to_string()));
        }
        return Ok(());
    }

    print!("{}", graph.print_tree(depth));
    Ok(())
}
