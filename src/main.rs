use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use webwrap::commands;
use webwrap::commands::build::BuildArgs;
use webwrap::commands::hash::Verification;
use webwrap_builder::BuildError;
use webwrap_core::BuildVariant;
use webwrap_core::icon::ScaleMode;

#[derive(Parser)]
#[command(name = "webwrap")]
#[command(about = "Turn a website into an installable Android app")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default project layout as JSON
    InitLayout {
        /// Layout file to create
        file: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Patch label, URL and package into the template project
    Patch {
        /// Template project root
        #[arg(long)]
        project: PathBuf,
        /// Layout file (defaults to the stock template layout)
        #[arg(long)]
        layout: Option<PathBuf>,
        /// App name shown under the launcher icon
        #[arg(long)]
        label: String,
        /// Website the app opens
        #[arg(long)]
        url: String,
        /// Package name; becomes application id com.<name>
        #[arg(long = "package")]
        package_name: Option<String>,
    },
    /// Regenerate launcher icons from an image
    Icons {
        /// Template project root
        #[arg(long)]
        project: PathBuf,
        /// Layout file (defaults to the stock template layout)
        #[arg(long)]
        layout: Option<PathBuf>,
        /// Source image (jpg, jpeg, png, webp or bmp)
        #[arg(long)]
        icon: PathBuf,
        /// Resize icons to each density's launcher size
        #[arg(long)]
        per_density: bool,
    },
    /// Patch, regenerate icons and build the APK with Gradle
    Build {
        /// Template project root
        #[arg(long)]
        project: PathBuf,
        /// Layout file (defaults to the stock template layout)
        #[arg(long)]
        layout: Option<PathBuf>,
        /// App name shown under the launcher icon
        #[arg(long)]
        label: String,
        /// Website the app opens
        #[arg(long)]
        url: String,
        /// Package name; becomes application id com.<name>
        #[arg(long = "package")]
        package_name: Option<String>,
        /// Source image (jpg, jpeg, png, webp or bmp)
        #[arg(long)]
        icon: PathBuf,
        /// debug or release
        #[arg(long, default_value = "debug")]
        variant: BuildVariant,
        /// Always run `clean` before assembling
        #[arg(long, conflicts_with = "no_clean")]
        clean: bool,
        /// Never run `clean` before assembling
        #[arg(long)]
        no_clean: bool,
        /// Resize icons to each density's launcher size
        #[arg(long)]
        per_density: bool,
        /// Kill Gradle after this many seconds (0 waits forever)
        #[arg(long, default_value_t = 0)]
        timeout: u64,
        /// Directory to copy the APK into
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the SHA-256 of a file
    Hash {
        /// File to hash
        file: PathBuf,
        /// Exit with 1 unless the file has this hash
        #[arg(long)]
        expect: Option<String>,
    },
}

fn scale_mode(per_density: bool) -> ScaleMode {
    if per_density {
        ScaleMode::PerDensity
    } else {
        ScaleMode::Identical
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,webwrap=debug"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::InitLayout { file, force } => match commands::init_layout::run(&file, force) {
            Ok(()) => println!("Wrote layout to {}", file.display()),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(2);
            }
        },
        Commands::Patch { project, layout, label, url, package_name } => {
            match commands::patch::run(
                &project,
                layout.as_deref(),
                &label,
                &url,
                package_name.as_deref(),
            ) {
                Ok(report) => {
                    for file in &report.files {
                        println!("Patched {}", file.display());
                    }
                    if let Some(tree) = &report.removed_tree {
                        println!("Removed {}", tree.display());
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(2);
                }
            }
        }
        Commands::Icons { project, layout, icon, per_density } => {
            match commands::icons::run(&project, layout.as_deref(), &icon, scale_mode(per_density)) {
                Ok(report) => {
                    println!(
                        "Removed {} stale icon(s), wrote {} icon(s) from a {}x{} image",
                        report.removed,
                        report.written.len(),
                        report.width,
                        report.height
                    );
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(2);
                }
            }
        }
        Commands::Build {
            project,
            layout,
            label,
            url,
            package_name,
            icon,
            variant,
            clean,
            no_clean,
            per_density,
            timeout,
            output,
        } => {
            let args = BuildArgs {
                project,
                layout,
                label,
                url,
                package_name,
                icon,
                variant,
                clean: if clean {
                    Some(true)
                } else if no_clean {
                    Some(false)
                } else {
                    None
                },
                scale_mode: scale_mode(per_density),
                timeout: commands::build::timeout_from_secs(timeout),
                output,
            };
            match commands::build::run(&args) {
                Ok(outcome) => {
                    print!("{}", outcome.result.stdout);
                    match (&outcome.result.artifact, &outcome.exported) {
                        (Some(_), Some(dest)) => println!("APK written to {}", dest.display()),
                        (Some(artifact), None) => {
                            println!("APK built at {}", artifact.path.display());
                            println!("SHA-256: {}", artifact.sha256);
                        }
                        (None, _) => {
                            println!("Build succeeded but no APK was found at the expected location");
                        }
                    }
                }
                Err(e) => {
                    if let Some(BuildError::TaskFailed { stdout, stderr, .. }) =
                        e.downcast_ref::<BuildError>()
                    {
                        eprintln!("Error: {}", e);
                        eprintln!("--- stdout ---\n{}", stdout);
                        eprintln!("--- stderr ---\n{}", stderr);
                        process::exit(1);
                    }
                    eprintln!("Error: {}", e);
                    process::exit(2);
                }
            }
        }
        Commands::Hash { file, expect: None } => match commands::hash::run(&file) {
            Ok(digest) => println!("{}: {} ({} bytes)", file.display(), digest.sha256, digest.size),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(2);
            }
        },
        Commands::Hash { file, expect: Some(hash) } => match commands::hash::verify(&file, &hash) {
            Ok(Verification::Match) => println!("Hash match"),
            Ok(Verification::Mismatch { actual }) => {
                println!("Hashes differ");
                println!("Expected hash: {}", hash);
                println!("Actual hash: {}", actual);
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(2);
            }
        },
    }
}
