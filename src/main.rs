use anyhow::anyhow;
use remake::artifact::ArtifactRef;
use remake::compile;
use remake::file::{DerivedFile, VirtualFile};
use remake::work;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

#[derive(argh::FromArgs)]
/// rebuild the demo target: compile foo.c (touched into existence) into foo.
struct Args {
    /// chdir before running
    #[argh(option, short = 'C')]
    chdir: Option<String>,
}

/// The one build target: `foo`, compiled from a virtual `foo.c`.
fn build_target() -> anyhow::Result<ArtifactRef> {
    let source = Rc::new(RefCell::new(VirtualFile::new("foo.c")));
    let target = DerivedFile::new("foo", compile::compile(source))?;
    Ok(Rc::new(RefCell::new(target)) as ArtifactRef)
}

fn run() -> anyhow::Result<i32> {
    let args: Args = argh::from_env();

    if let Some(dir) = args.chdir {
        let dir = Path::new(&dir);
        std::env::set_current_dir(dir).map_err(|err| anyhow!("chdir {:?}: {}", dir, err))?;
    }

    let target = build_target()?;
    match work::ensure_current(&target)? {
        0 => println!("remake: no work to do"),
        n => println!("remake: ran {} tasks, now up to date", n),
    }
    Ok(0)
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            println!("remake: error: {}", err);
            1
        }
    };
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
