use clap::Parser;
use intentsim_io::storage::{read_run_document, RunDocument};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Checks persisted run documents for invariant violations", long_about = None)]
struct Args {
    /// A single run document to verify. When omitted, every document in `--dir` is checked.
    #[arg(short, long)]
    input: Option<String>,

    #[arg(short, long, default_value = "data")]
    dir: String,
}

/// Returns one message per violated invariant.
fn check_document(doc: &RunDocument) -> Vec<String> {
    let mut problems = Vec::new();
    let mut last_timestamp = None;

    for snap in &doc.data {
        let t = snap.timestamp;
        if let Some(prev) = last_timestamp {
            if t <= prev {
                problems.push(format!("t={}: timestamp not after previous sample {}", t, prev));
            }
        }
        last_timestamp = Some(t);

        if !(0.0..=1.0).contains(&snap.system_entropy) {
            problems.push(format!("t={}: system entropy {} outside [0, 1]", t, snap.system_entropy));
        }

        let counts = &snap.particle_counts;
        let by_charge = counts.positive + counts.negative + counts.neutral;
        if by_charge != snap.total_particles {
            problems.push(format!(
                "t={}: charge counts sum to {} but population is {}",
                t, by_charge, snap.total_particles
            ));
        }

        let clusters = &snap.cluster_analysis;
        // Documents written without cluster sizes only carry the count.
        let legacy = clusters.cluster_sizes.is_empty() && clusters.cluster_count > 0;
        if !legacy {
            if clusters.cluster_sizes.len() != clusters.cluster_count {
                problems.push(format!(
                    "t={}: cluster_count {} but {} distinct cluster ids",
                    t,
                    clusters.cluster_count,
                    clusters.cluster_sizes.len()
                ));
            }
            let clustered: usize = clusters.cluster_sizes.values().sum();
            if clustered > snap.total_particles {
                problems.push(format!(
                    "t={}: {} clustered particles exceed population {}",
                    t, clustered, snap.total_particles
                ));
            }
            let largest = clusters.cluster_sizes.values().copied().max().unwrap_or(0);
            if largest != clusters.largest_cluster_size {
                problems.push(format!(
                    "t={}: largest cluster {} but sizes say {}",
                    t, clusters.largest_cluster_size, largest
                ));
            }
        }
    }

    for anomaly in &doc.anomalies {
        if !(0.0..=1.0).contains(&anomaly.severity) {
            problems.push(format!(
                "anomaly {} at t={}: severity {} outside [0, 1]",
                anomaly.kind, anomaly.timestamp, anomaly.severity
            ));
        }
        if anomaly.timestamp <= doc.config.engine.stabilization_steps {
            problems.push(format!(
                "anomaly {} at t={}: reported inside the stabilization window",
                anomaly.kind, anomaly.timestamp
            ));
        }
    }

    problems
}

fn collect_documents(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_doc = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with("simulation_") && n.ends_with(".json"))
            .unwrap_or(false);
        if is_doc {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let paths = match &args.input {
        Some(input) => vec![PathBuf::from(input)],
        None => collect_documents(Path::new(&args.dir))?,
    };

    if paths.is_empty() {
        println!("No run documents found in {}. Nothing to verify.", args.dir);
        return Ok(());
    }

    let mut failed = 0;
    for path in &paths {
        let doc = read_run_document(path)?;
        let problems = check_document(&doc);
        println!(
            "{} ({} samples, {} anomalies, config {})",
            path.display(),
            doc.data.len(),
            doc.anomalies.len(),
            &doc.config.fingerprint()[..16]
        );
        if problems.is_empty() {
            println!("  ok");
        } else {
            failed += 1;
            for p in &problems {
                println!("  FAIL {}", p);
            }
        }
    }

    anyhow::ensure!(failed == 0, "{} of {} documents failed verification", failed, paths.len());
    Ok(())
}
