use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use pygmentize::decode::{TokenStream, decode_value};
use pygmentize::format::{DebugFormatter, Formatter, HtmlFormatter, RawFormatter};

/// `pygmentize -f raw -l php` output for a short PHP snippet.
const PHP_RAW: &str = "Token.Comment.Preproc\t'<?php'\n\
Token.Text\t'\\n'\n\
Token.Comment.Single\t'// Keys can be obtained in the Mollom site manager.'\n\
Token.Text\t'\\n'\n\
Token.Name.Variable\t'$public'\n\
Token.Text\t' '\n\
Token.Operator\t'='\n\
Token.Text\t' '\n\
Token.Literal.String.Double\t'\"'\n\
Token.Literal.String.Double\t'your-public-key'\n\
Token.Literal.String.Double\t'\"'\n\
Token.Punctuation\t';'\n\
Token.Text\t'\\n'\n\
Token.Name.Variable\t'$private'\n\
Token.Text\t' '\n\
Token.Operator\t'='\n\
Token.Text\t' '\n\
Token.Literal.String.Single\t\"'yo\\xfcr-private-key'\"\n\
Token.Punctuation\t';'\n\
Token.Text\t'\\n'\n\
Token.Name.Variable\t'$mollom'\n\
Token.Text\t' '\n\
Token.Operator\t'='\n\
Token.Text\t' '\n\
Token.Keyword\t'new'\n\
Token.Text\t' '\n\
Token.Name.Other\t'Zend_Service_Mollom'\n\
Token.Punctuation\t'('\n\
Token.Name.Variable\t'$public'\n\
Token.Punctuation\t','\n\
Token.Text\t' '\n\
Token.Name.Variable\t'$private'\n\
Token.Punctuation\t');'\n\
Token.Text\t'\\n\\n'\n\
Token.Comment.Single\t'// Mandarin: \\u5b98\\u8a71'\n\
Token.Text\t'\\n'\n";

fn run<F: Formatter>(raw: &str, formatter: &F) -> String {
    let mut out = String::with_capacity(raw.len());
    for record in TokenStream::new(raw.as_bytes()) {
        let (token, text) = record.unwrap();
        out.push_str(&formatter.format(&token, &text).unwrap());
    }
    out
}

fn bench_decode_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_value");
    for (name, raw) in [
        ("plain", "'// Keys can be obtained in the Mollom site manager.'"),
        ("escapes", "'\\n\\n\\u5b98\\u8a71 yo\\xfcr \\\\ \\t'"),
    ] {
        group.bench_function(name, |b| b.iter(|| decode_value(black_box(raw)).unwrap()));
    }
    group.finish();
}

fn bench_stream(c: &mut Criterion) {
    let raw = PHP_RAW.repeat(50);
    let mut group = c.benchmark_group("stream");
    group.bench_function("raw", |b| b.iter(|| run(black_box(&raw), &RawFormatter)));
    group.bench_function("debug", |b| b.iter(|| run(black_box(&raw), &DebugFormatter)));
    let html = HtmlFormatter::new();
    group.bench_function("html", |b| b.iter(|| run(black_box(&raw), &html)));
    let strict = HtmlFormatter::new().strict(true);
    group.bench_function("html_strict", |b| b.iter(|| run(black_box(&raw), &strict)));
    group.finish();
}

criterion_group!(benches, bench_decode_value, bench_stream);
criterion_main!(benches);
