//! The `atlas` binary.

fn main() {
    if let Err(err) = atlas::args::run() {
        let _ = atlas_common::sh_err!("{err:?}");
        std::process::exit(1);
    }
}
