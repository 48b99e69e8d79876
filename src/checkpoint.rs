//! Checkpoint path formatting and load/save orchestration for
//! `MultiClassMachine` (§4.12, §6).

use std::path::{Path, PathBuf};

use crate::{
    buffered_io::{new_input_file, new_output_file, try_open_checkpoint, BufferedWrite},
    config::Config,
    multiclass::MultiClassMachine,
};

/// `results/<experiment>-c%04d-p%04d-g%04d-t%04d.machine`, matching the
/// original naming (`clauses / 10`, `round(p * 10000)`, `round(gamma *
/// 10000)`) so a run can be resumed by re-deriving the same path from its
/// hyperparameters.
pub fn path_for(config: &Config) -> PathBuf {
    Path::new("results").join(format!(
        "{}-c{:04}-p{:04}-g{:04}-t{:04}.machine",
        config.experiment,
        config.clauses / 10,
        (config.p * 10000.0).round() as u32,
        (config.gamma * 10000.0).round() as u32,
        config.threshold,
    ))
}

/// Load a checkpoint if `config.resume` is set and the file exists;
/// otherwise construct a fresh machine.
pub fn load_or_init(config: &Config, features: usize, classes: usize) -> MultiClassMachine {
    let path = path_for(config);
    if config.resume {
        if let Some(mut reader) = try_open_checkpoint(&path) {
            let machine = MultiClassMachine::read(&mut reader);
            machine.check_compatible(&path, features, classes);
            return machine;
        }
    }
    MultiClassMachine::new(
        features,
        classes,
        config.clauses,
        config.p,
        config.gamma,
        config.threshold,
        config.state_bits,
        config.seed,
    )
}

pub fn save(config: &Config, machine: &MultiClassMachine) {
    let path = path_for(config);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let mut writer = new_output_file(1 << 16, &path);
    machine.write(&mut writer);
    writer.flush_buffer();
}

/// Thin re-export so callers needn't import `buffered_io` directly just to
/// open the training/test files.
pub fn open_dataset_file(path: &Path) -> std::io::BufReader<std::fs::File> {
    new_input_file(1 << 16, path)
}
