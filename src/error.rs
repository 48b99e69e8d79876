// Fatal, diagnostic-and-exit error reporting for the CLI/driver boundary.
// Every function here prints a human-readable message and terminates the
// process — the core (`binary_machine`, `multiclass`) never calls into this
// module; its invariants are preconditions, not recoverable conditions.

use std::path::Path;
use std::process::exit;

pub fn missing_dataset(path: &Path) -> ! {
    println!("Dataset file {} is missing!", path.display());
    exit(1);
}

pub fn malformed_sample(path: &Path, line: usize, expected: usize, found: usize) -> ! {
    println!(
        "Inconsistent sample at line {} of {}: expected {} tokens, found {}",
        line, path.display(), expected, found
    );
    exit(2);
}

pub fn invalid_hyperparameter(message: &str) -> ! {
    println!("Invalid hyperparameter: {}", message);
    exit(3);
}

pub fn incompatible_checkpoint(path: &Path, message: &str) -> ! {
    println!("Checkpoint {} is incompatible with this dataset: {}", path.display(), message);
    exit(3);
}
