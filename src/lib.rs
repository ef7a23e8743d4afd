/*!

## glTrace function-hook generator

Offline code generator for the glTrace OpenGL capture/replay library. From a
declarative catalog of GL entry points (and a description of which entries
touch context state) it emits the `functionhooks.gen.h` /
`functionhooks.gen.cpp` pair: real-pointer trampolines, recording hook
bodies, the tagged-union serialization packet with its read/write/replay
operations, and the context-state classes that remember and restore GL state
when a capture starts mid-stream.

The generator itself never touches a GL header; the emitted code calls the
hand-written runtime (`FileLike`, `Checkpoint`, `Once`, `SafeFree`, mhook and
the platform loader) by name only.

### Using the generators

```rust,no_run
use gltrace_codegen::{hooks, HeaderGenerator, SourceGenerator};
use std::fs::File;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = hooks::catalog().into_registry()?;

    let mut header = File::create("functionhooks.gen.h")?;
    registry.write_bindings(HeaderGenerator::new("gltrace-codegen"), &mut header)?;

    let mut source = File::create("functionhooks.gen.cpp")?;
    registry.write_bindings(SourceGenerator::new("gltrace-codegen"), &mut source)?;
    Ok(())
}
```

Output is deterministic: for a fixed catalog and command line the two files
are byte-identical on every run.

*/

pub mod catalog;
pub mod header;
pub mod hooks;
mod length;
pub mod registry;
pub mod source;

use std::io;

pub use crate::catalog::{Bin, Catalog, CatalogError, ClassDef, EntryDef};
pub use crate::registry::Registry;

/// One side of the emitted pair. Implementations render a whole file from
/// the sorted registry.
pub trait Generator {
    fn write<W>(&self, registry: &Registry, dest: &mut W) -> io::Result<()>
    where
        W: io::Write;
}

/// Emits `functionhooks.gen.h`.
pub struct HeaderGenerator {
    command_line: String,
}

impl HeaderGenerator {
    /// `command_line` is echoed verbatim into the regeneration banner.
    pub fn new(command_line: &str) -> HeaderGenerator {
        HeaderGenerator {
            command_line: command_line.to_string(),
        }
    }
}

impl Generator for HeaderGenerator {
    fn write<W>(&self, registry: &Registry, dest: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        header::write(registry, &self.command_line, dest)
    }
}

/// Emits `functionhooks.gen.cpp`.
pub struct SourceGenerator {
    command_line: String,
}

impl SourceGenerator {
    /// `command_line` is echoed verbatim into the regeneration banner.
    pub fn new(command_line: &str) -> SourceGenerator {
        SourceGenerator {
            command_line: command_line.to_string(),
        }
    }
}

impl Generator for SourceGenerator {
    fn write<W>(&self, registry: &Registry, dest: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        source::write(registry, &self.command_line, dest)
    }
}
