use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use clap::{Parser, ValueEnum};
use ksuid::Ksuid;
use std::io::{self, Write};
use std::time::SystemTime;

#[derive(Parser)]
#[command(name = "ksuid", version, about = "Generate and inspect KSUIDs")]
struct Args {
    /// Number of KSUIDs to generate when called with no other arguments.
    #[arg(short = 'n', long = "count", default_value_t = 1)]
    count: usize,

    /// Output format.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::String)]
    format: Format,

    /// Template used with the `template` format; `{string}`, `{raw}`,
    /// `{time}`, `{timestamp}` and `{payload}` expand per identifier.
    #[arg(short = 't', long = "template", default_value = "")]
    template: String,

    /// Prefix each line of output with the KSUID that produced it.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// KSUIDs to inspect; fresh ones are generated when empty.
    ids: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    String,
    Inspect,
    Time,
    Timestamp,
    Payload,
    Raw,
    Template,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let ids: Vec<Ksuid> = if args.ids.is_empty() {
        (0..args.count).map(|_| Ksuid::new()).collect()
    } else {
        args.ids
            .iter()
            .map(|arg| Ksuid::parse(arg).with_context(|| format!("error when parsing {arg:?}")))
            .collect::<anyhow::Result<_>>()?
    };

    let mut out = io::stdout().lock();
    for id in ids {
        if args.verbose {
            write!(out, "{id}: ")?;
        }
        print_id(&mut out, id, args.format, &args.template)?;
    }

    Ok(())
}

fn print_id(out: &mut impl Write, id: Ksuid, format: Format, template: &str) -> io::Result<()> {
    match format {
        Format::String => writeln!(out, "{id}"),
        Format::Inspect => write!(out, "{}", inspect(&id)),
        Format::Time => writeln!(out, "{}", format_time(id.time())),
        Format::Timestamp => writeln!(out, "{}", id.timestamp()),
        Format::Payload => out.write_all(id.payload()),
        Format::Raw => out.write_all(id.as_bytes()),
        Format::Template => writeln!(out, "{}", expand_template(template, &id)),
    }
}

fn inspect(id: &Ksuid) -> String {
    format!(
        "\n\
         REPRESENTATION:\n\
         \n\
         \x20 String: {}\n\
         \x20    Raw: {}\n\
         \n\
         COMPONENTS:\n\
         \n\
         \x20      Time: {}\n\
         \x20 Timestamp: {}\n\
         \x20   Payload: {}\n\
         \n",
        id,
        hex_upper(id.as_bytes()),
        format_time(id.time()),
        id.timestamp(),
        hex_upper(id.payload()),
    )
}

fn expand_template(template: &str, id: &Ksuid) -> String {
    template
        .replace("{string}", &id.to_string())
        .replace("{raw}", &hex_upper(id.as_bytes()))
        .replace("{time}", &format_time(id.time()))
        .replace("{timestamp}", &id.timestamp().to_string())
        .replace("{payload}", &hex_upper(id.payload()))
}

fn format_time(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn hex_upper(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn sample() -> Ksuid {
        let mut payload = [0_u8; 16];
        payload[15] = 1;
        Ksuid::from_parts(UNIX_EPOCH + Duration::from_secs(1_632_859_955), &payload).unwrap()
    }

    #[test]
    fn hex_output_is_uppercase_and_padded() {
        assert_eq!(hex_upper(&[0x00, 0x0F, 0xAB]), "000FAB");
    }

    #[test]
    fn template_expands_every_field() {
        let id = sample();
        let line = expand_template("{string} {timestamp} {payload}", &id);
        assert_eq!(
            line,
            format!(
                "{} {} {}",
                id,
                id.timestamp(),
                hex_upper(id.payload())
            )
        );
    }

    #[test]
    fn times_render_as_rfc3339_utc() {
        assert_eq!(format_time(sample().time()), "2021-09-28T20:12:35Z");
    }

    #[test]
    fn inspect_reports_all_components() {
        let id = sample();
        let report = inspect(&id);
        assert!(report.contains(&id.to_string()));
        assert!(report.contains("232859955"));
        assert!(report.contains(&hex_upper(id.payload())));
    }
}
