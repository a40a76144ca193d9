//! Stand-ins for Mineways and Blender, run through `sh` so nothing needs an executable bit.

#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

/// Parses the script it is given, then exports a tiny model and writes the script to
/// `<record_dir>/mineways.mwscript`. Worlds that don't exist get the real error
/// marker in the log, after which the process hangs like Mineways does.
const FAKE_MINEWAYS: &str = r#"
record="$1"; shift
script="$5"
cp "$script" "$record/mineways.mwscript"
printf '%s\n' "$@" > "$record/mineways-args.txt"
log=$(sed -n 's/^Save Log file: //p' "$script")
world=$(sed -n 's/^Minecraft world: //p' "$script")
obj=$(sed -n 's/^Export for Rendering: //p' "$script")
echo "Mineways test double" > "$log"
if [ ! -d "$world" ]; then
    echo "Error reading line 2: Mineways attempted to load world $world but could not." >> "$log"
    exec sleep 30
fi
base="${obj%.obj}"
echo "mtllib snippet.mtl" > "$obj"
echo "newmtl stone" > "$base.mtl"
: > "$base-RGBA.png"
"#;

/// Copies a prepared PNG to the output path, which is the last argument.
const FAKE_BLENDER: &str = r#"
record="$1"; shift
fixture="$1"; shift
printf '%s\n' "$@" > "$record/blender-args.txt"
for out in "$@"; do :; done
cp "$fixture" "$out"
"#;

const FAILING_TOOL: &str = r#"
exit 3
"#;

/// Succeeds without writing anything.
const SILENT_TOOL: &str = r#"
exit 0
"#;

/// Mineways that writes one line to its log and then fails.
const LOGGING_FAILURE: &str = r#"
line="$1"; shift
script="$5"
log=$(sed -n 's/^Save Log file: //p' "$script")
echo "$line" > "$log"
exit 1
"#;

/// Leaves a trace if it ever runs.
const TRIPWIRE: &str = r#"
touch "$1"
"#;

pub struct Fakes {
    pub dir: tempfile::TempDir,
}

impl Fakes {
    pub fn new() -> Self {
        let fakes = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        fakes.write("mineways.sh", FAKE_MINEWAYS);
        fakes.write("blender.sh", FAKE_BLENDER);
        fakes.write("failing.sh", FAILING_TOOL);
        fakes.write("silent.sh", SILENT_TOOL);
        fakes.write("logging-failure.sh", LOGGING_FAILURE);
        fakes.write("tripwire.sh", TRIPWIRE);
        render_fixture().save(fakes.fixture()).unwrap();
        fakes
    }

    fn write(&self, name: &str, body: &str) {
        fs::write(self.dir.path().join(name), body).unwrap();
    }

    fn script(&self, name: &str) -> String {
        format!("sh \"{}\"", self.dir.path().join(name).display())
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn fixture(&self) -> PathBuf {
        self.path("fixture.png")
    }

    pub fn mineways(&self) -> String {
        format!("{} \"{}\"", self.script("mineways.sh"), self.dir.path().display())
    }

    pub fn blender(&self) -> String {
        format!(
            "{} \"{}\" \"{}\"",
            self.script("blender.sh"),
            self.dir.path().display(),
            self.fixture().display()
        )
    }

    pub fn failing(&self) -> String {
        self.script("failing.sh")
    }

    pub fn silent(&self) -> String {
        self.script("silent.sh")
    }

    /// Mineways stand-in that logs `line` and exits with status 1.
    pub fn logging_failure(&self, line: &str) -> String {
        format!("{} \"{line}\"", self.script("logging-failure.sh"))
    }

    pub fn tripwire(&self, name: &str) -> String {
        format!("{} \"{}\"", self.script("tripwire.sh"), self.tripwire_path(name).display())
    }

    pub fn tripwire_path(&self, name: &str) -> PathBuf {
        self.path(&format!("{name}.tripped"))
    }

    pub fn recorded(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).unwrap()
    }
}

pub const CANVAS: u32 = 64;
pub const CONTENT: (u32, u32, u32, u32) = (10, 20, 30, 12);

/// A transparent canvas with one opaque rectangle at `CONTENT`.
pub fn render_fixture() -> RgbaImage {
    let (x, y, w, h) = CONTENT;
    let mut image = RgbaImage::new(CANVAS, CANVAS);
    for py in y..y + h {
        for px in x..x + w {
            image.put_pixel(px, py, Rgba([90, 160, 60, 255]));
        }
    }
    image
}

pub fn world_dir(root: &Path) -> PathBuf {
    let world = root.join("world");
    fs::create_dir_all(&world).unwrap();
    fs::write(world.join("level.dat"), b"").unwrap();
    world
}
