use clap::{Parser, Subcommand};
use course_site::calendar::plan_schedule;
use course_site::export::Exporter;
use course_site::{config, course, output, stock};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "course-site")]
#[command(about = "Static site exporter for course homepages")]
#[command(long_about = "\
Static site exporter for course homepages

A course description (JSON) is merged into a directory of base HTML templates
and written out as a small static site, one directory per course.

Template directory:

  base/
  ├── index.html          # span#inlined_course
  ├── syllabus.html
  ├── schedule.html       # table#schedule
  ├── hws.html            # table.hws
  ├── projects.html
  ├── css/                # Copied on first export
  └── images/             # Copied on first export

Every template needs <title>, div#banner, div#navbar and span#instructor_link.

Run 'course-site gen-templates base' to write a stock template directory and
'course-site gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file (stock defaults are used if it does not exist)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export every published page of a course
    Export {
        /// Course description (JSON)
        course: PathBuf,
    },
    /// Lay out the course calendar and print it without writing anything
    Check {
        /// Course description (JSON)
        course: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Write stock base templates, stylesheet and images/ into a directory
    GenTemplates {
        /// Target directory (created if missing)
        dir: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Export { course } => {
            let site_config = config::load_config(&cli.config)?;
            let course = course::load_course(&course)?;
            let exporter = Exporter::from_config(&site_config);
            let report = exporter.export_site(&course)?;
            output::print_export_report(&report);
        }
        Command::Check { course } => {
            let course = course::load_course(&course)?;
            let weeks = plan_schedule(&course);
            output::print_schedule_plan(&course, &weeks);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::GenTemplates { dir } => {
            let written = stock::write_stock_templates(&dir)?;
            output::print_written_files(&dir, &written);
        }
    }

    Ok(())
}
