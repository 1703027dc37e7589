//! Binary entry point for the cubeview touch-driven 3D shape viewer.

use std::path::Path;

use cubeview::{options::Options, Viewer};

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(opts) => opts,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
