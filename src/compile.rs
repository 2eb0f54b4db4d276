//! Builder that turns one input file into one output file by invoking an
//! external compiler, `tool <input> -o <output>`.

use crate::artifact::{ArtifactRef, Builder, BuilderRef, File};
use crate::error::BuildError;
use crate::file::TrackedFile;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Default tool name, resolved on PATH at run() time.
pub const DEFAULT_TOOL: &str = "cc";

pub struct Compile<F: File> {
    tool: String,
    input: Rc<RefCell<F>>,
    output: PathBuf,
}

impl<F: File> Compile<F> {
    pub fn new(input: Rc<RefCell<F>>, output: impl Into<PathBuf>) -> Self {
        Compile::with_tool(DEFAULT_TOOL, input, output)
    }

    pub fn with_tool(
        tool: impl Into<String>,
        input: Rc<RefCell<F>>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Compile {
            tool: tool.into(),
            input,
            output: output.into(),
        }
    }
}

impl<F: File + 'static> Builder for Compile<F> {
    fn prerequisites(&self) -> Vec<ArtifactRef> {
        vec![self.input.clone() as ArtifactRef]
    }

    fn run(&self) -> Result<Vec<ArtifactRef>, BuildError> {
        let tool = which::which(&self.tool)
            .map_err(|_| BuildError::MissingTool(self.tool.clone()))?;
        let input = self.input.borrow();
        let mut cmd = std::process::Command::new(&tool)
            .arg(input.path())
            .arg("-o")
            .arg(&self.output)
            .output()?;
        if !cmd.status.success() {
            let mut output = Vec::new();
            output.append(&mut cmd.stdout);
            output.append(&mut cmd.stderr);
            append_termination(&mut output, &cmd.status);
            return Err(BuildError::Failed {
                command: format!(
                    "{} {} -o {}",
                    tool.display(),
                    input.path().display(),
                    self.output.display()
                ),
                message: String::from_utf8_lossy(&output).into_owned(),
            });
        }
        let out = TrackedFile::new(&self.output)?;
        Ok(vec![Rc::new(RefCell::new(out)) as ArtifactRef])
    }
}

/// Describe an abnormal termination in the failure message.
#[cfg(unix)]
fn append_termination(output: &mut Vec<u8>, status: &std::process::ExitStatus) {
    use std::io::Write;
    use std::os::unix::process::ExitStatusExt;
    if let Some(sig) = status.signal() {
        match sig {
            libc::SIGINT => write!(output, "interrupted").unwrap(),
            _ => write!(output, "signal {}", sig).unwrap(),
        }
    }
}

#[cfg(not(unix))]
fn append_termination(_output: &mut Vec<u8>, _status: &std::process::ExitStatus) {}

/// Builder factory for a DerivedFile target: captures the input now, takes
/// the output path when the derived artifact is constructed.
pub fn compile<F: File + 'static>(
    input: Rc<RefCell<F>>,
) -> impl FnOnce(&Path) -> BuilderRef {
    move |output: &Path| Rc::new(RefCell::new(Compile::new(input, output))) as BuilderRef
}
