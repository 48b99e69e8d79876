//! Training driver: wires together dataset loading, validation sampling,
//! the per-epoch training loop, checkpointing, and progress logging
//! (§4.13). Kept outside the hot per-sample loop in `binary_machine`, which
//! never logs.

use std::time::Instant;

use tracing::info;

use crate::{checkpoint, config::Config, dataset, multiclass::MultiClassMachine};

/// Runs the full training schedule described by `config`: loads the
/// datasets, draws a fast proxy-evaluation subsample of `|test|/4` rows
/// from the *full* training set (§4.11 — this is a faster accuracy probe,
/// not a held-out split; training still sees every training row), resumes
/// or initializes a machine, then trains for `config.epochs` further
/// epochs, logging progress each epoch and, if `config.write` is set,
/// saving a checkpoint once at the end.
pub fn fit(config: &Config) {
    config.print();

    let train = dataset::load_training_data(&config.train_path);
    let test = dataset::load_data(&config.test_path, train.features);
    let classes = dataset::class_count(&[&train, &test]);

    let mut machine = checkpoint::load_or_init(config, train.features, classes);

    // Proxy subsample size is |test|/4, drawn from the machine's own PRNG
    // stream so it consumes from the same generator that drives training
    // (matching the original design's single global `mcg_state`).
    let proxy_count = test.labels.len() / 4;
    let proxy = dataset::sample_data(&train, proxy_count, machine.rng_mut());

    info!(
        experiment = %config.experiment,
        train_samples = train.labels.len(),
        proxy_samples = proxy.labels.len(),
        test_samples = test.labels.len(),
        classes,
        resumed_epoch = machine.epoch(),
        "starting training"
    );

    for _ in 0..config.epochs {
        let start = Instant::now();
        machine.fit(&train.data, &train.labels, config.shuffle);
        let elapsed = start.elapsed();

        let test_accuracy = machine.evaluate(&test.data, &test.labels);
        let proxy_accuracy = machine.evaluate(&proxy.data, &proxy.labels);

        info!(
            epoch = machine.epoch(),
            elapsed_ms = elapsed.as_millis() as u64,
            test_accuracy,
            proxy_accuracy,
            "epoch complete"
        );
    }

    if config.write {
        checkpoint::save(config, &machine);
        info!(path = %checkpoint::path_for(config).display(), "checkpoint written");
    }
}

/// Evaluate an already-trained machine against the test set only, without
/// running any further epochs. Used for a quick `-r`-only invocation.
pub fn evaluate(config: &Config) -> f64 {
    let train_full = dataset::load_training_data(&config.train_path);
    let test = dataset::load_data(&config.test_path, train_full.features);
    let classes = dataset::class_count(&[&train_full, &test]);
    let mut machine: MultiClassMachine = checkpoint::load_or_init(config, train_full.features, classes);
    machine.evaluate(&test.data, &test.labels)
}
