//! Filter Dashboard CLI
//!
//! Command-line tool for paging through, filtering, bookmarking and exporting
//! comma-delimited datasets.

use clap::{Parser, Subcommand};
use dash_core::{
    export_rows, row_key, search_options, Dashboard, DashboardConfig, ExportFormat, Row,
};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dash-cli")]
#[command(about = "Filter Dashboard for delimited text datasets", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Layout configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a dataset and display its shape
    Parse {
        /// Path to dataset file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show one window of the filtered, paginated table
    Show {
        /// Path to dataset file
        #[arg(short, long)]
        file: PathBuf,

        /// Column filter, `column=value1,value2` (repeatable); empty values
        /// such as `column=` or `column=,x` select empty fields
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, Vec<String>)>,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Window within the page (0-based)
        #[arg(short, long, default_value_t = 0)]
        window: usize,

        /// Bookmark a dataset row by its 1-based position (repeatable)
        #[arg(short, long)]
        bookmark: Vec<usize>,

        /// Only show bookmarked rows
        #[arg(long)]
        bookmarks_only: bool,
    },

    /// List the filter options available for each column
    Options {
        /// Path to dataset file
        #[arg(short, long)]
        file: PathBuf,

        /// Column filter, `column=value1,value2` (repeatable); empty values
        /// such as `column=` or `column=,x` select empty fields
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, Vec<String>)>,

        /// Only list options containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the identity key of a dataset row
    Key {
        /// Path to dataset file
        #[arg(short, long)]
        file: PathBuf,

        /// Row position (1-based)
        #[arg(short, long)]
        row: usize,
    },

    /// Export the filtered rows to a file
    Export {
        /// Path to dataset file
        #[arg(short, long)]
        file: PathBuf,

        /// Column filter, `column=value1,value2` (repeatable); empty values
        /// such as `column=` or `column=,x` select empty fields
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, Vec<String>)>,

        /// Output format (csv or json)
        #[arg(long, default_value = "csv")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log level used when RUST_LOG is not set
fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> dash_core::Result<()> {
    let config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };

    match cli.command {
        Commands::Parse { file } => cmd_parse(&file, &config),
        Commands::Show {
            file,
            filters,
            page,
            window,
            bookmark,
            bookmarks_only,
        } => cmd_show(&file, &config, &filters, page, window, &bookmark, bookmarks_only),
        Commands::Options {
            file,
            filters,
            search,
            json,
        } => cmd_options(&file, &config, &filters, search.as_deref(), json),
        Commands::Key { file, row } => cmd_key(&file, &config, row),
        Commands::Export {
            file,
            filters,
            format,
            output,
        } => cmd_export(&file, &config, &filters, &format, &output),
    }
}

/// Parse `column=value1,value2` into a column name and its values
fn parse_filter(arg: &str) -> Result<(String, Vec<String>), String> {
    let (column, values) = arg
        .split_once('=')
        .ok_or_else(|| format!("invalid filter '{}', expected 'column=value1,value2'", arg))?;

    if column.is_empty() {
        return Err(format!("invalid filter '{}', column name is empty", arg));
    }

    let values = values.split(',').map(str::to_string).collect();
    Ok((column.to_string(), values))
}

/// Load a dataset and apply command-line filters to a new session
fn open_dashboard(
    file: &Path,
    config: &DashboardConfig,
    filters: &[(String, Vec<String>)],
) -> dash_core::Result<Dashboard> {
    let mut dashboard = Dashboard::load(file, config)?;

    for (column, values) in filters {
        debug!(column = %column, ?values, "applying command-line filter");
        dashboard.set_filter(column, values.iter().map(String::as_str));
    }
    dashboard.filters().check_columns(dashboard.headers())?;

    Ok(dashboard)
}

fn find_row(dashboard: &Dashboard, position: usize) -> dash_core::Result<&Row> {
    position
        .checked_sub(1)
        .and_then(|i| dashboard.table().rows.get(i))
        .ok_or_else(|| dash_core::Error::RowNotFound {
            row: position,
            count: dashboard.table().row_count(),
        })
}

fn print_rows(headers: &[String], rows: &[&Row], marker: impl Fn(&Row) -> &'static str) {
    println!("\t{}", headers.join("\t"));
    println!("{}", "-".repeat((headers.len() + 1) * 12));

    for &row in rows {
        let values: Vec<&str> = headers
            .iter()
            .map(|h| row.get(h).unwrap_or_default())
            .collect();
        println!("{}\t{}", marker(row), values.join("\t"));
    }
}

fn cmd_parse(file: &Path, config: &DashboardConfig) -> dash_core::Result<()> {
    let dashboard = Dashboard::load(file, config)?;
    let table = dashboard.table();

    println!("File: {}", file.display());
    println!("Columns: {}", table.column_count());
    println!("Rows: {}", table.row_count());
    println!("Filterable: {}", table.filter_columns().join(", "));
    println!();

    let preview: Vec<&Row> = table.rows.iter().take(10).collect();
    print_rows(&table.headers, &preview, |_| "");

    if table.row_count() > 10 {
        println!("... ({} more rows)", table.row_count() - 10);
    }

    Ok(())
}

fn cmd_show(
    file: &Path,
    config: &DashboardConfig,
    filters: &[(String, Vec<String>)],
    page: usize,
    window: usize,
    bookmarks: &[usize],
    bookmarks_only: bool,
) -> dash_core::Result<()> {
    let mut dashboard = open_dashboard(file, config, filters)?;

    for &position in bookmarks {
        let row = find_row(&dashboard, position)?.clone();
        if !dashboard.is_bookmarked(&row) {
            dashboard.toggle_bookmark(&row);
        }
    }
    dashboard.set_view_bookmarks(bookmarks_only);

    for _ in 1..page {
        if !dashboard.next_page() {
            break;
        }
    }
    for _ in 0..window {
        if !dashboard.next_window() {
            break;
        }
    }

    for column in dashboard.filter_columns() {
        println!("{}: {}", column, dashboard.filters().summary(column));
    }
    println!();

    let visible = dashboard.visible_rows();
    print_rows(dashboard.headers(), &visible, |row| {
        if dashboard.is_bookmarked(row) {
            "*"
        } else {
            ""
        }
    });

    let (first, last, page_len) = dashboard.window_range();
    println!();
    println!("Rows {}-{} of {}", first, last, page_len);
    println!(
        "Page {} of {} ({} matching rows)",
        dashboard.pager().page(),
        dashboard.total_pages(),
        dashboard.filtered_rows().len()
    );

    Ok(())
}

fn cmd_options(
    file: &Path,
    config: &DashboardConfig,
    filters: &[(String, Vec<String>)],
    search: Option<&str>,
    json: bool,
) -> dash_core::Result<()> {
    let dashboard = open_dashboard(file, config, filters)?;
    let mut options = dashboard.filter_options();

    if let Some(query) = search {
        for option in &mut options {
            let matching: Vec<String> = search_options(&option.values, query)
                .into_iter()
                .map(str::to_string)
                .collect();
            option.values = matching;
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    for option in &options {
        println!(
            "{} [{}] ({} options)",
            option.column,
            dashboard.filters().summary(&option.column),
            option.values.len()
        );
        if option.values.is_empty() {
            println!("  No options");
        }
        for value in &option.values {
            let mark = if dashboard.filters().is_selected(&option.column, value) {
                "x"
            } else {
                " "
            };
            println!("  [{}] {}", mark, value);
        }
    }

    Ok(())
}

fn cmd_key(file: &Path, config: &DashboardConfig, position: usize) -> dash_core::Result<()> {
    let dashboard = Dashboard::load(file, config)?;
    let row = find_row(&dashboard, position)?;
    println!("{}", row_key(row));
    Ok(())
}

fn cmd_export(
    file: &Path,
    config: &DashboardConfig,
    filters: &[(String, Vec<String>)],
    format: &str,
    output: &Path,
) -> dash_core::Result<()> {
    let format: ExportFormat = format.parse()?;
    let dashboard = open_dashboard(file, config, filters)?;
    let rows = dashboard.filtered_rows();

    export_rows(output, format, dashboard.headers(), &rows)?;
    println!("Exported {} rows to {}", rows.len(), output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("mod350=0,1").unwrap(),
            ("mod350".to_string(), vec!["0".to_string(), "1".to_string()])
        );
        assert_eq!(parse_filter("mod350=").unwrap().1, vec![String::new()]);
        assert_eq!(
            parse_filter("mod350=,1").unwrap().1,
            vec![String::new(), "1".to_string()]
        );
        assert!(parse_filter("mod350").is_err());
        assert!(parse_filter("=1").is_err());
    }

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(0), "warn");
        assert_eq!(default_level(1), "debug");
        assert_eq!(default_level(3), "trace");
    }

    #[test]
    fn test_filter_selects_empty_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "number,mod350\n1,\n2,1\n3,0\n").unwrap();

        let filters = vec![parse_filter("mod350=,1").unwrap()];
        let dashboard = open_dashboard(file.path(), &DashboardConfig::default(), &filters).unwrap();
        let numbers: Vec<&str> = dashboard
            .filtered_rows()
            .iter()
            .map(|r| r.get("number").unwrap_or_default())
            .collect();
        assert_eq!(numbers, vec!["1", "2"]);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_open_dashboard_applies_filters() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "number,mod350\n1,0\n2,1\n").unwrap();
        let config = DashboardConfig::default();

        let filters = vec![("bogus".to_string(), vec!["1".to_string()])];
        let err = open_dashboard(file.path(), &config, &filters).unwrap_err();
        assert!(matches!(err, dash_core::Error::UnknownColumn(c) if c == "bogus"));

        let filters = vec![("mod350".to_string(), vec!["1".to_string()])];
        let dashboard = open_dashboard(file.path(), &config, &filters).unwrap();
        assert_eq!(dashboard.filtered_rows().len(), 1);

        assert!(find_row(&dashboard, 2).is_ok());
        assert!(matches!(
            find_row(&dashboard, 0),
            Err(dash_core::Error::RowNotFound { row: 0, count: 2 })
        ));
        assert!(find_row(&dashboard, 3).is_err());
    }
}
