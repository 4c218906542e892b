use std::fmt::Write as _;
use std::hint::black_box;

use criterion::{Criterion, Throughput};
use rand::Rng;

use libshell::binder::{BoundArgs, bind};
use libshell::config::Config;
use libshell::error::Error;
use libshell::registry::{Command, Registry};
use libshell::schema::{DefaultValue, Field, FlagKind, IntWidth, Schema};
use libshell::shell::{Context, Shell};
use libshell::token::tokenize;

const PWM_FIELDS: &[Field] = &[
    Field::uint("channel", IntWidth::W8),
    Field::uint("duty", IntWidth::W16).with_default(DefaultValue::Uint(0)),
    Field::flag("invert", FlagKind::Set),
];
const PWM: Schema = Schema::new("pwm", "drive a pwm channel", PWM_FIELDS);

fn pwm_handler(_ctx: &mut Context<'_>, args: &BoundArgs<'_>) -> Result<(), Error> {
    black_box(args.uint("duty"));
    Ok(())
}

fn registry() -> Registry {
    static COMMANDS: &[Command] = &[Command {
        schema: PWM,
        handler: pwm_handler,
        completer: None,
    }];
    Registry::build(COMMANDS).unwrap()
}

pub fn bench_tokenize(c: &mut Criterion) {
    let line = r#"pwm 3 "duty cycle" 0x7fff --invert trailing tokens"#;
    let mut group = c.benchmark_group("tokenize");
    group.throughput(Throughput::Bytes(line.len() as u64));
    group.bench_function("quoted_line", |b| {
        b.iter(|| tokenize(black_box(line)).unwrap())
    });
    group.finish();
}

pub fn bench_bind(c: &mut Criterion) {
    let config = Config::default();
    let tokens = ["7", "0x1fff", "--invert"];
    c.bench_function("bind/pwm", |b| {
        b.iter(|| bind(black_box(&PWM), black_box(&tokens), &config).unwrap())
    });
}

pub fn bench_dispatch(c: &mut Criterion) {
    let registry = registry();
    let mut rng = rand::thread_rng();
    let lines: Vec<String> = (0..64)
        .map(|_| {
            let mut line = String::new();
            write!(
                line,
                "pwm {} {}",
                rng.gen_range(0u8..8),
                rng.gen_range(0u16..0x2000)
            )
            .unwrap();
            line
        })
        .collect();

    c.bench_function("dispatch/pwm", |b| {
        let mut shell = Shell::new(&registry, Config::default());
        let mut out = String::new();
        let mut next = 0;
        b.iter(|| {
            out.clear();
            let line = &lines[next];
            next = (next + 1) % lines.len();
            shell.dispatch(&mut out, black_box(line)).unwrap()
        })
    });
}
