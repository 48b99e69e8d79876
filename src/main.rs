use std::env;

use tracing::info;

use wtm::{config::Config, driver};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(
            "wtm=info".parse().unwrap(),
        ))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = Config::new(&args);

    // `-e 0` with `-r` requests a one-shot evaluation of an existing
    // checkpoint against the test set, with no further training epochs.
    if config.epochs == 0 && config.resume {
        let accuracy = driver::evaluate(&config);
        info!(test_accuracy = accuracy, "evaluated checkpoint");
        return;
    }

    driver::fit(&config);
}
