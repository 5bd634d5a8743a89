// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;

use super::{ConsoleFormat, LogConfig, LogLevel, SourceLabels, source_span};
use crate::config::types::GlobalConfig;

#[test]
fn test_log_level_bounds() {
    assert_eq!(LogLevel::try_from(0).ok(), Some(LogLevel::SILENT));
    assert_eq!(LogLevel::try_from(6).ok(), Some(LogLevel::DUMP));
    assert!(LogLevel::try_from(7).is_err());
    assert_eq!(u8::from(LogLevel::DEBUG), 4);
}

#[test]
fn test_log_level_directives() {
    let directives: Vec<_> = (0..=6)
        .filter_map(|level| LogLevel::try_from(level).ok())
        .map(LogLevel::directives)
        .collect();
    insta::assert_debug_snapshot!(directives, @r#"
    [
        "off",
        "error",
        "warn",
        "warn,mrdev=info",
        "warn,mrdev=debug",
        "warn,mrdev=trace",
        "trace",
    ]
    "#);
}

#[test]
fn test_log_level_deserialize_rejects_out_of_range() {
    let ok: LogLevel = serde_json::from_str("5").expect("valid level");
    assert_eq!(ok, LogLevel::TRACE);
    assert_eq!(serde_json::to_string(&ok).expect("serializes"), "5");
    assert!(serde_json::from_str::<LogLevel>("12").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level, LogLevel::INFO);
    assert_eq!(config.file_level, LogLevel::TRACE);
    assert!(config.log_file.is_none());
}

#[test]
fn test_log_config_from_global() {
    let global = GlobalConfig {
        output_log_level: LogLevel::WARN,
        file_log_level: LogLevel::DUMP,
        log_file: Some("logs/mrdev.log".into()),
        ..GlobalConfig::default()
    };
    let config = LogConfig::from(&global);
    assert_eq!(config.console_level, LogLevel::WARN);
    assert_eq!(config.file_level, LogLevel::DUMP);
    assert_eq!(config.log_file.as_deref(), Some(Path::new("logs/mrdev.log")));
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn console_output(emit: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::registry().with(SourceLabels).with(
        fmt::layer()
            .event_format(ConsoleFormat)
            .with_writer(move || writer.clone()),
    );
    tracing::subscriber::with_default(subscriber, emit);
    let bytes = captured.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn test_console_prefixes_source_name() {
    let output = console_output(|| {
        let span = source_span("tools.foo", "update");
        let _entered = span.enter();
        tracing::warn!("working copy is dirty");
    });
    assert_eq!(output, " WARN [tools.foo] working copy is dirty\n");
}

#[test]
fn test_console_uses_innermost_source() {
    let output = console_output(|| {
        let outer = source_span("outer", "checkout");
        let _outer = outer.enter();
        {
            let inner = source_span("inner", "checkout");
            let _inner = inner.enter();
            tracing::info!("cloning");
        }
        tracing::info!("done");
    });
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(lines, [" INFO [inner] cloning", " INFO [outer] done"]);
}

#[test]
fn test_console_without_source_has_no_prefix() {
    let output = console_output(|| tracing::error!("update failed"));
    assert_eq!(output, "ERROR update failed\n");
}
