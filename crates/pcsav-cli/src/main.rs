use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use pcsav_core::backup::BackupBeforeDelete;
use pcsav_core::picker::{AcceptOutcome, CareerChoice, Confirm, Confirmation, PickerMode, SaveChoice};
use pcsav_core::{
    JsonSummaryReader, Origin, RecordReader, RepositoryLayout, Reputation, SavePicker, naming,
    probe,
};

#[derive(Parser, Debug)]
#[command(
    name = "pcsav",
    about = "Browse and manage .pcsav careers and saves",
    version
)]
struct Cli {
    /// Repository root holding one directory per career
    #[arg(long, global = true, env = "PCSAV_ROOT", default_value = ".")]
    root: PathBuf,
    /// Save file extension
    #[arg(long, global = true, default_value = pcsav_core::layout::DEFAULT_EXTENSION)]
    ext: String,
    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List careers, most recent first
    Careers(ListArgs),
    /// List saves of a career, most recent first
    Saves(SavesArgs),
    /// Decode a career directory name
    Decode { name: String },
    /// Encode a career directory name
    Encode(EncodeArgs),
    /// Store a save file in the repository (new save, new career, or overwrite)
    Store(StoreArgs),
    /// Pick an existing save and print its path
    Load(LoadArgs),
    /// Delete a career and all of its saves
    DeleteCareer(DeleteCareerArgs),
    /// Delete a single save
    DeleteSave(DeleteSaveArgs),
    /// Zip a career directory next to it
    Backup { career: PathBuf },
}

#[derive(ClapArgs, Debug)]
struct ListArgs {
    /// Emit JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(ClapArgs, Debug)]
struct SavesArgs {
    /// Career directory (absolute, or a name under --root)
    career: PathBuf,
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(ClapArgs, Debug)]
struct EncodeArgs {
    #[arg(long)]
    name: String,
    /// Origin code 0-3
    #[arg(long, default_value_t = 0)]
    origin: u8,
    /// Reputation code 0-3
    #[arg(long, default_value_t = 0)]
    reputation: u8,
    /// Class identifier from the record format, e.g. 93952
    #[arg(long)]
    class_id: i32,
    /// Identity GUID (8-4-4-4-12) or hex bytes
    #[arg(long)]
    guid: String,
    /// Creation date as DDMMYY; defaults to today
    #[arg(long)]
    date: Option<String>,
}

#[derive(ClapArgs, Debug)]
struct StoreArgs {
    /// Save file to store; its summary names a new career
    file: PathBuf,
    /// Store as a new save in this career
    #[arg(long, conflicts_with = "new_career")]
    career: Option<PathBuf>,
    /// Store as the first save of a new career
    #[arg(long, default_value_t = false)]
    new_career: bool,
    /// Overwrite this existing save instead of allocating a new one
    #[arg(long, requires = "career")]
    overwrite: Option<PathBuf>,
    /// Answer yes to confirmations
    #[arg(long, short = 'y', default_value_t = false)]
    yes: bool,
}

#[derive(ClapArgs, Debug)]
struct LoadArgs {
    /// Career directory; defaults to the most recent
    #[arg(long)]
    career: Option<PathBuf>,
    /// Save file; defaults to the most recent in the career
    #[arg(long)]
    save: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct DeleteCareerArgs {
    career: PathBuf,
    #[arg(long, short = 'y', default_value_t = false)]
    yes: bool,
    /// Zip the career before deleting it
    #[arg(long, default_value_t = false)]
    backup: bool,
}

#[derive(ClapArgs, Debug)]
struct DeleteSaveArgs {
    save: PathBuf,
    #[arg(long, short = 'y', default_value_t = false)]
    yes: bool,
}

/// Asks on stdin unless told to assume yes.
struct Prompt {
    assume_yes: bool,
}

impl Confirm for Prompt {
    fn confirm(&mut self, request: Confirmation<'_>) -> bool {
        if self.assume_yes {
            return true;
        }
        let question = match request {
            Confirmation::Overwrite(p) => format!("Overwrite save {}?", p.display()),
            Confirmation::DeleteCareer(p) => format!("Delete career {}?", p.display()),
            Confirmation::DeleteSave(p) => format!("Delete save {}?", p.display()),
        };
        eprint!("{} [y/N] ", question);
        io::stderr().flush().ok();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim(), "y" | "Y" | "yes")
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let layout = RepositoryLayout::new(&cli.root).with_extension(&cli.ext);
    let res = match cli.cmd.unwrap_or(Cmd::Careers(ListArgs { json: false })) {
        Cmd::Careers(a) => cmd_careers(&layout, a),
        Cmd::Saves(a) => cmd_saves(&layout, a),
        Cmd::Decode { name } => cmd_decode(&name),
        Cmd::Encode(a) => cmd_encode(a),
        Cmd::Store(a) => cmd_store(&layout, a),
        Cmd::Load(a) => cmd_load(&layout, a),
        Cmd::DeleteCareer(a) => cmd_delete_career(&layout, a),
        Cmd::DeleteSave(a) => cmd_delete_save(&layout, a),
        Cmd::Backup { career } => pcsav_core::backup::backup_career(&resolve(&layout, &career))
            .map(|p| println!("{}", p.display()))
            .map_err(Into::into),
    };
    if let Err(e) = res {
        eprintln!("error: {:#}", e);
        std::process::exit(2);
    }
}

fn resolve(layout: &RepositoryLayout, p: &Path) -> PathBuf {
    if p.is_absolute() || p.starts_with(&layout.root) {
        p.to_path_buf()
    } else {
        layout.root.join(p)
    }
}

fn print_json(v: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(v)?);
    Ok(())
}

fn cmd_careers(layout: &RepositoryLayout, args: ListArgs) -> Result<()> {
    let careers = pcsav_core::scan_careers(layout, &JsonSummaryReader);
    if args.json {
        return print_json(&pcsav_core::json::careers_to_json(&careers));
    }
    for c in careers {
        println!(
            "{}\t{}\t{}",
            c.display_name(),
            c.detail().unwrap_or_default(),
            c.path.display()
        );
    }
    Ok(())
}

fn cmd_saves(layout: &RepositoryLayout, args: SavesArgs) -> Result<()> {
    let listing = pcsav_core::scan_saves(layout, &resolve(layout, &args.career));
    if args.json {
        return print_json(&pcsav_core::json::saves_to_json(&listing));
    }
    for s in &listing.entries {
        println!(
            "{}\t{}",
            s.file_name(),
            s.sequence.map(|n| n.to_string()).unwrap_or_else(|| "-".into())
        );
    }
    println!("highest: {}", listing.highest);
    Ok(())
}

fn cmd_decode(name: &str) -> Result<()> {
    let token = naming::decode(name).ok_or_else(|| anyhow!("not a career name: {}", name))?;
    print_json(&pcsav_core::json::token_to_json(&token))
}

fn cmd_encode(args: EncodeArgs) -> Result<()> {
    let origin = char::from_digit(args.origin.into(), 10)
        .and_then(Origin::from_digit)
        .ok_or_else(|| anyhow!("origin must be 0-3"))?;
    let reputation = char::from_digit(args.reputation.into(), 10)
        .and_then(Reputation::from_digit)
        .ok_or_else(|| anyhow!("reputation must be 0-3"))?;
    let fingerprint = probe::parse_fingerprint(&args.guid).map_err(|e| anyhow!("--guid: {}", e))?;
    let date = match args.date {
        Some(d) => NaiveDate::parse_from_str(&d, "%d%m%y").context("--date must be DDMMYY")?,
        None => chrono::Local::now().date_naive(),
    };
    println!(
        "{}",
        naming::encode(&args.name, origin, reputation, args.class_id, &fingerprint, date)
    );
    Ok(())
}

fn existing_career(layout: &RepositoryLayout, career: &Path) -> CareerChoice {
    CareerChoice::Existing(resolve(layout, career))
}

fn cmd_store(layout: &RepositoryLayout, args: StoreArgs) -> Result<()> {
    let reader = JsonSummaryReader;
    let mut picker = SavePicker::new(layout.clone(), PickerMode::Save, reader);
    // Only a new career needs the summary; other stores accept any file.
    if let Ok(summary) = probe(&reader as &dyn RecordReader, &args.file) {
        picker = picker.with_record(summary);
    }
    picker.open()?;

    if args.new_career {
        picker.select_career(CareerChoice::New)?;
    } else if let Some(career) = &args.career {
        picker.select_career(existing_career(layout, career))?;
    }
    if let Some(save) = &args.overwrite {
        picker.select_save(SaveChoice::Existing(resolve(layout, save)))?;
    } else if picker.selected_career().is_some() {
        picker.select_save(SaveChoice::New)?;
    }

    let mut prompt = Prompt { assume_yes: args.yes };
    let target = match picker.accept(&mut prompt)? {
        AcceptOutcome::Accepted(t) => t,
        AcceptOutcome::Declined => bail!("overwrite declined"),
    };
    if let Some(dir) = target.path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }
    std::fs::copy(&args.file, &target.path)
        .with_context(|| format!("copying to {}", target.path.display()))?;
    println!("{}", target.path.display());
    Ok(())
}

fn cmd_load(layout: &RepositoryLayout, args: LoadArgs) -> Result<()> {
    let mut picker = SavePicker::new(layout.clone(), PickerMode::Load, JsonSummaryReader);
    picker.open()?;
    if let Some(career) = &args.career {
        picker.select_career(existing_career(layout, career))?;
    }
    if let Some(save) = &args.save {
        picker.select_save(SaveChoice::Existing(resolve(layout, save)))?;
    }
    if !picker.can_accept() {
        bail!("no save to load");
    }
    match picker.accept(&mut Prompt { assume_yes: true })? {
        AcceptOutcome::Accepted(t) => println!("{}", t.path.display()),
        AcceptOutcome::Declined => bail!("declined"),
    }
    Ok(())
}

fn cmd_delete_career(layout: &RepositoryLayout, args: DeleteCareerArgs) -> Result<()> {
    let mut picker = SavePicker::new(layout.clone(), PickerMode::Load, JsonSummaryReader);
    picker.open()?;
    picker.select_career(CareerChoice::Existing(resolve(layout, &args.career)))?;
    let mut prompt = Prompt { assume_yes: args.yes };
    let outcome = if args.backup {
        let mut confirm = BackupBeforeDelete::new(prompt);
        let outcome = picker.delete_career(&mut confirm)?;
        if let Some(e) = confirm.error {
            return Err(e).context("backup failed; career kept");
        }
        if let Some(zip) = &confirm.archive {
            eprintln!("backup: {}", zip.display());
        }
        outcome
    } else {
        picker.delete_career(&mut prompt)?
    };
    match outcome {
        Some(report) => {
            print_json(&pcsav_core::json::report_to_json(&report))?;
            if !report.is_complete() {
                bail!("career only partially deleted");
            }
        }
        None => eprintln!("cancelled"),
    }
    Ok(())
}

fn cmd_delete_save(layout: &RepositoryLayout, args: DeleteSaveArgs) -> Result<()> {
    let save = resolve(layout, &args.save);
    let career = save
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("save has no career directory"))?;
    let mut picker = SavePicker::new(layout.clone(), PickerMode::Load, JsonSummaryReader);
    picker.open()?;
    picker.select_career(CareerChoice::Existing(career))?;
    picker.select_save(SaveChoice::Existing(save))?;
    match picker.delete_save(&mut Prompt { assume_yes: args.yes })? {
        Some(report) => {
            print_json(&pcsav_core::json::report_to_json(&report))?;
            if !report.is_complete() {
                bail!("save not deleted");
            }
        }
        None => eprintln!("cancelled"),
    }
    Ok(())
}
