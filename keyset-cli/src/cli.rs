//! Command definitions and handlers.

use std::convert::Infallible;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::{DateTime, SecondsFormat, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use keyset::{
    Direction, KeyColumns, Order, Page, Value, compose, decode_int64_cursor,
    decode_time_and_int64_cursor, decode_time_cursor, encode_int64_cursor,
    encode_time_and_int64_cursor, encode_time_cursor,
};
use serde::Serialize;
use serde_json::json;

use crate::config::{Config, DialectName};

#[derive(Debug, Parser)]
#[command(name = "keyset", version, about = "Keyset pagination cursors and queries")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (defaults to ./keyset.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode a key into an opaque cursor
    Encode {
        #[command(subcommand)]
        key: EncodeKey,
    },
    /// Decode a cursor back into its key
    Decode {
        /// Key shape the cursor was built from
        #[arg(value_enum)]
        shape: CursorShape,

        /// Cursor to decode
        cursor: String,

        #[arg(long, help = "Print the decoded key as JSON")]
        json: bool,
    },
    /// Print the paginated SQL and bind values for a base query
    Query(QueryArgs),
}

#[derive(Debug, Subcommand)]
pub enum EncodeKey {
    /// Integer key
    Int {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// RFC 3339 timestamp key
    Time { time: String },
    /// Composite timestamp and integer key
    TimeId {
        time: String,
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CursorShape {
    Int,
    Time,
    TimeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyKind {
    Id,
    Time,
    TimeId,
}

#[derive(Debug, clap::Args)]
pub struct QueryArgs {
    /// Base statement, `SELECT ... FROM ... [WHERE ...]`
    #[arg(long)]
    pub base: String,

    /// Key shape to paginate on
    #[arg(long, value_enum)]
    pub key: KeyKind,

    /// Key column names, comma separated (time column first for time-id)
    #[arg(long, value_delimiter = ',', required = true)]
    pub columns: Vec<String>,

    /// Boundary cursor from a previous page
    #[arg(long, default_value = "")]
    pub cursor: String,

    /// Rows per page; zero or negative means 50
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Display order: asc or desc
    #[arg(long)]
    pub order: Option<Order>,

    /// Direction of travel: next or prev (anything else means next)
    #[arg(long, default_value = "next", value_parser = parse_direction)]
    pub direction: Direction,

    /// Placeholder style
    #[arg(long, value_enum)]
    pub dialect: Option<DialectName>,

    #[arg(long, help = "Print the query as JSON")]
    pub json: bool,
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    sql: &'a str,
    params: &'a [Value],
}

impl Command {
    pub fn run(self, config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
        match self {
            Self::Encode { key } => writeln!(out, "{}", encode(&key)?)?,
            Self::Decode {
                shape,
                cursor,
                json,
            } => decode(shape, &cursor, json, out)?,
            Self::Query(args) => query(args, config, out)?,
        }
        Ok(())
    }
}

/// Unknown directions fall back to `next`, like a page request would.
fn parse_direction(s: &str) -> Result<Direction, Infallible> {
    Ok(Direction::parse_or_default(s))
}

fn parse_time(s: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("invalid RFC 3339 timestamp {s:?}"))?
        .with_timezone(&Utc))
}

fn format_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn encode(key: &EncodeKey) -> anyhow::Result<String> {
    Ok(match key {
        EncodeKey::Int { value } => encode_int64_cursor(*value),
        EncodeKey::Time { time } => encode_time_cursor(&parse_time(time)?),
        EncodeKey::TimeId { time, id } => encode_time_and_int64_cursor(&parse_time(time)?, *id),
    })
}

fn decode(shape: CursorShape, cursor: &str, as_json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let context = || format!("cannot decode {cursor:?} as a {shape:?} cursor");
    let (text, value) = match shape {
        CursorShape::Int => {
            let id = decode_int64_cursor(cursor).with_context(context)?;
            (id.to_string(), json!({ "id": id }))
        },
        CursorShape::Time => {
            let time = format_time(&decode_time_cursor(cursor).with_context(context)?);
            (time.clone(), json!({ "time": time }))
        },
        CursorShape::TimeId => {
            let (time, id) = decode_time_and_int64_cursor(cursor).with_context(context)?;
            let time = format_time(&time);
            (format!("{time} {id}"), json!({ "time": time, "id": id }))
        },
    };
    if as_json {
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    } else {
        writeln!(out, "{text}")?;
    }
    Ok(())
}

fn key_columns(kind: KeyKind, columns: &[String]) -> anyhow::Result<KeyColumns> {
    Ok(match (kind, columns) {
        (KeyKind::Id, [col]) => KeyColumns::id(col.as_str()),
        (KeyKind::Time, [col]) => KeyColumns::time(col.as_str()),
        (KeyKind::TimeId, [time, id]) => KeyColumns::time_and_id(time.as_str(), id.as_str()),
        (KeyKind::TimeId, _) => bail!("--key time-id needs two columns, got {}", columns.len()),
        (_, _) => bail!("--key {kind:?} needs one column, got {}", columns.len()),
    })
}

fn query(args: QueryArgs, config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    let keys = key_columns(args.key, &args.columns)?;
    let limit = args.limit.or(config.defaults.limit).unwrap_or(0);
    let order = args
        .order
        .or(config.defaults.order)
        .unwrap_or(Order::Ascending);
    let dialect = args
        .dialect
        .or(config.defaults.dialect)
        .unwrap_or_default()
        .dialect();

    let page = Page::new(limit)
        .with_cursor(args.cursor)
        .with_direction(args.direction);
    let result = compose(&args.base, &page, order, &keys, &*dialect);

    if args.json {
        let output = QueryOutput {
            sql: &result.sql,
            params: &result.params,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        writeln!(out, "{}", result.sql)?;
        for (i, param) in result.params.iter().enumerate() {
            writeln!(out, "  {} = {}", i + 1, serde_json::to_string(param)?)?;
        }
    }
    Ok(())
}
