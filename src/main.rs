//! Trains a classifier on two seeded Gaussian clusters and reports accuracy.
//!
//! Usage:
//!   ferrite-mlp [SPEC_JSON] [MODEL_OUT_JSON]
//!
//! Without a spec file the network is [2, 4, 2] with ReLU, lr 0.1, 1000 epochs
//! and seed 42. Set `RUST_LOG=debug` to see every sampled loss.
use std::{env, io};

use log::info;
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};

use ferrite_mlp::{ActivationFunction, Matrix, Network, NetworkSpec};

const DATA_SEED: u64 = 7;
const SAMPLES_PER_CLUSTER: usize = 50;

fn default_spec() -> NetworkSpec {
    NetworkSpec::new(vec![2, 4, 2])
        .with_activation(ActivationFunction::ReLU)
        .with_learning_rate(0.1)
        .with_epochs(1000)
        .with_seed(42)
}

/// Unit-variance clusters around (-2, -2) labelled 0 and (2, 2) labelled 1,
/// interleaved so any prefix is balanced.
fn two_clusters(rng: &mut StdRng, per_cluster: usize) -> io::Result<(Matrix, Vec<usize>)> {
    let noise = Normal::new(0.0, 1.0).map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let mut rows = Vec::with_capacity(2 * per_cluster);
    let mut labels = Vec::with_capacity(2 * per_cluster);
    for _ in 0..per_cluster {
        for (label, center) in [(0, -2.0), (1, 2.0)] {
            rows.push(vec![center + noise.sample(rng), center + noise.sample(rng)]);
            labels.push(label);
        }
    }
    Ok((Matrix::from_rows(rows)?, labels))
}

fn main() -> io::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let spec = match args.first() {
        Some(path) => {
            info!("loading spec from {path}");
            NetworkSpec::load_json(path)?
        }
        None => default_spec(),
    };
    if spec.input_size() != 2 || spec.output_size() != 2 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "the demo dataset needs an architecture starting and ending with width 2",
        ));
    }

    let mut rng = StdRng::seed_from_u64(DATA_SEED);
    let (x_train, y_train) = two_clusters(&mut rng, SAMPLES_PER_CLUSTER)?;
    let (x_test, y_test) = two_clusters(&mut rng, SAMPLES_PER_CLUSTER)?;

    let mut network = Network::new(spec)?;
    network.fit(&x_train, &y_train)?;

    println!("train accuracy: {:.2}%", network.score(&x_train, &y_train)? * 100.0);
    println!("test accuracy:  {:.2}%", network.score(&x_test, &y_test)? * 100.0);
    for (epoch, loss) in network.loss_history_epochs().iter().zip(network.loss_history()) {
        println!("epoch {epoch:>6}: loss = {loss:.6}");
    }

    if let Some(out) = args.get(1) {
        network.save_json(out)?;
        info!("model written to {out}");
    }
    Ok(())
}
