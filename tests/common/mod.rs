//! Shared fixtures for pipeline tests: a minimal React Native project and fake
//! toolchain scripts that record how they were called.

#![allow(dead_code)]

use sim_bundler::bundler::{Settings, SettingsBuilder};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const APP_NAME: &str = "fixture";

pub const DELEGATE_SOURCE: &str = "\
#import \"AppDelegate.h\"

#import <React/RCTBundleURLProvider.h>
#import <React/RCTRootView.h>

@implementation AppDelegate

- (BOOL)application:(UIApplication *)application didFinishLaunchingWithOptions:(NSDictionary *)launchOptions
{
  NSURL *jsCodeLocation;

  jsCodeLocation = [[RCTBundleURLProvider sharedSettings] jsBundleURLForBundleRoot:@\"index\" fallbackResource:nil];

  RCTRootView *rootView = [[RCTRootView alloc] initWithBundleURL:jsCodeLocation
                                                      moduleName:@\"fixture\"
                                                initialProperties:nil
                                                    launchOptions:launchOptions];
  return YES;
}

@end
";

/// Records a script's arguments, working directory and packager env var.
const RECORD: &str = r#"
name=$(basename "$0")
: > "$LOG_DIR/$name.args"
for arg in "$@"; do printf '%s\n' "$arg" >> "$LOG_DIR/$name.args"; done
pwd > "$LOG_DIR/$name.cwd"
printf '%s' "${RCT_NO_LAUNCH_PACKAGER:-unset}" > "$LOG_DIR/$name.env"
"#;

const XCODEBUILD_OK: &str = r#"
cp "$DELEGATE" "$LOG_DIR/delegate_during_build.m"
mkdir -p "build/Build/Products/Debug-iphonesimulator/$APP.app"
printf 'binary' > "build/Build/Products/Debug-iphonesimulator/$APP.app/$APP"
echo "** BUILD SUCCEEDED **"
"#;

const XCODEBUILD_FAIL: &str = r#"
echo "error: Signing for \"fixture\" requires a development team." >&2
echo "** BUILD FAILED **" >&2
exit 65
"#;

/// Fails the build and replaces the delegate with a directory so the restore write fails too.
const XCODEBUILD_BREAK_DELEGATE: &str = r#"
rm -f "$DELEGATE"
mkdir -p "$DELEGATE"
echo "** BUILD FAILED **" >&2
exit 65
"#;

const REACT_NATIVE_OK: &str = r#"
out=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "--bundle-output" ]; then out="$arg"; fi
  prev="$arg"
done
printf 'offline bundle' > "$out"
"#;

const REACT_NATIVE_FAIL: &str = r#"
echo "error: Unable to resolve module ./App" >&2
exit 1
"#;

const ZIP_OK: &str = r#"
# zip -r -q <archive> <input>
if [ ! -d "$4" ]; then echo "zip error: Nothing to do! ($4)" >&2; exit 12; fi
printf 'PK fake archive of %s' "$4" > "$3"
"#;

/// Behaviour of the fake `xcodebuild`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Build {
    Succeeds,
    Fails,
    BreaksDelegate,
}

/// A React Native project on disk with fake tools.
pub struct Fixture {
    pub dir: TempDir,
    pub root: PathBuf,
    pub bin: PathBuf,
    pub logs: PathBuf,
}

impl Fixture {
    /// Creates a project with a single `fixture.xcodeproj`, working tools and `index.js`.
    pub fn new() -> Self {
        Self::with_tools(Build::Succeeds, true)
    }

    /// Creates a project whose tools behave as requested.
    pub fn with_tools(build: Build, bundle_succeeds: bool) -> Self {
        let fixture = Self::bare();
        fixture.write_tools(build, bundle_succeeds);
        fixture
    }

    /// Creates the project layout without any tools.
    pub fn bare() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("project");
        let bin = dir.path().join("bin");
        let logs = dir.path().join("logs");

        fs::create_dir_all(root.join("ios").join(format!("{APP_NAME}.xcodeproj"))).unwrap();
        fs::create_dir_all(root.join("ios").join(APP_NAME)).unwrap();
        fs::write(root.join("ios").join(APP_NAME).join("AppDelegate.m"), DELEGATE_SOURCE).unwrap();
        fs::write(root.join("index.js"), "import './App';\n").unwrap();
        fs::write(
            root.join("app.json"),
            format!(r#"{{"name": "{APP_NAME}", "displayName": "Fixture"}}"#),
        )
        .unwrap();
        fs::create_dir_all(&bin).unwrap();
        fs::create_dir_all(&logs).unwrap();

        Self {
            dir,
            root,
            bin,
            logs,
        }
    }

    pub fn delegate_path(&self) -> PathBuf {
        self.root.join("ios").join(APP_NAME).join("AppDelegate.m")
    }

    pub fn release_dir(&self) -> PathBuf {
        self.root
            .join("ios/build/Build/Products/Debug-iphonesimulator")
    }

    pub fn tool(&self, name: &str) -> PathBuf {
        self.bin.join(name)
    }

    /// Writes the fake toolchain.
    fn write_tools(&self, build: Build, bundle_succeeds: bool) {
        let xcodebuild = match build {
            Build::Succeeds => XCODEBUILD_OK,
            Build::Fails => XCODEBUILD_FAIL,
            Build::BreaksDelegate => XCODEBUILD_BREAK_DELEGATE,
        };
        let react_native = if bundle_succeeds {
            REACT_NATIVE_OK
        } else {
            REACT_NATIVE_FAIL
        };

        self.write_script("xcodebuild", xcodebuild);
        self.write_script("react-native", react_native);
        self.write_script("zip", ZIP_OK);
    }

    fn write_script(&self, name: &str, body: &str) {
        let path = self.tool(name);
        let script = format!(
            "#!/bin/sh\nLOG_DIR='{}'\nDELEGATE='{}'\nAPP='{}'\n{}\n{}",
            self.logs.display(),
            self.delegate_path().display(),
            APP_NAME,
            RECORD,
            body
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    pub fn settings(&self) -> Settings {
        SettingsBuilder::new()
            .app_name(APP_NAME)
            .root_dir(&self.root)
            .react_native(self.tool("react-native"))
            .xcodebuild(self.tool("xcodebuild"))
            .zip(self.tool("zip"))
            .build()
            .expect("settings")
    }

    /// Arguments a fake tool was last called with, one per element.
    pub fn args_of(&self, tool: &str) -> Vec<String> {
        read_lines(&self.logs.join(format!("{tool}.args")))
    }

    pub fn cwd_of(&self, tool: &str) -> PathBuf {
        let cwd = fs::read_to_string(self.logs.join(format!("{tool}.cwd"))).unwrap();
        PathBuf::from(cwd.trim_end())
    }

    pub fn env_of(&self, tool: &str) -> String {
        fs::read_to_string(self.logs.join(format!("{tool}.env"))).unwrap()
    }

    pub fn was_called(&self, tool: &str) -> bool {
        self.logs.join(format!("{tool}.args")).exists()
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(String::from)
        .collect()
}

/// Compares directories through their canonical form (tempdirs may sit behind symlinks).
pub fn same_dir(a: &Path, b: &Path) -> bool {
    a.canonicalize().unwrap() == b.canonicalize().unwrap()
}
