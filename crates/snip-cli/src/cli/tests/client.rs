//! Tests for encode, decode and interactive.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_encode() {
    match parse(&["snip", "encode", "https://www.wikipedia.org/"]) {
        CliCommand::Encode { value, server } => {
            assert_eq!(value, "https://www.wikipedia.org/");
            assert!(server.is_none());
        }
        _ => panic!("expected Encode"),
    }
}

#[test]
fn cli_parse_encode_text_with_server() {
    match parse(&["snip", "encode", "Hello World!", "--server", "http://127.0.0.1:9000"]) {
        CliCommand::Encode { value, server } => {
            assert_eq!(value, "Hello World!");
            assert_eq!(server.as_deref(), Some("http://127.0.0.1:9000"));
        }
        _ => panic!("expected Encode with --server"),
    }
}

#[test]
fn cli_encode_requires_value() {
    assert!(Cli::try_parse_from(["snip", "encode"]).is_err());
}

#[test]
fn cli_parse_decode() {
    match parse(&["snip", "decode", "vite.lol/1"]) {
        CliCommand::Decode { url, server } => {
            assert_eq!(url, "vite.lol/1");
            assert!(server.is_none());
        }
        _ => panic!("expected Decode"),
    }
}

#[test]
fn cli_parse_interactive() {
    match parse(&["snip", "interactive", "--server", "https://vite.lol"]) {
        CliCommand::Interactive { server } => {
            assert_eq!(server.as_deref(), Some("https://vite.lol"))
        }
        _ => panic!("expected Interactive"),
    }
}
