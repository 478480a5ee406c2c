// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2023 Yulong Ming (myl7)

//! Narrated runs of the Herradura suite.
//! The printed layout is for reading only.

use clap::{Args, Parser, Subcommand};
use rand::{RngCore, SeedableRng};

use herradura_rs::haen::{self, Decrypt, Encrypt};
use herradura_rs::hkex::{self, Party, Transcript};
use herradura_rs::prg::Aes256CtrPrg;
use herradura_rs::suite::{hske, KeyPair};
use herradura_rs::{Alignment, BigRing, Params, PubSize, Result, Ring};

#[derive(Debug, Parser)]
#[command(about = "Herradura key exchange and encryption demos")]
struct Opt {
    /// Seed an AES256-CTR PRG for reproducible values. Otherwise use the thread RNG.
    #[arg(short, long, env = "HERRADURA_SEED", global = true)]
    seed: Option<u64>,

    /// Trace every REVOLVE round, secrets included
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Fold position `W - 1 - count` of the 2nd FSCX operand instead of `count`
    #[arg(long, env = "HERRADURA_MIRRORED", global = true)]
    mirrored: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// HKEX only
    Kex(NativeArgs),
    /// HKEX, then HAEN1 and HAEN2
    Haen(NativeArgs),
    /// HKEX on an arbitrary-width ring
    Bignum(BignumArgs),
    /// HSKE, HPKS and HPKE
    Suite(NativeArgs),
}

#[derive(Debug, Args)]
struct NativeArgs {
    /// Ring width `W` in 8, 16, 32 or 64
    #[arg(short, long, env = "HERRADURA_WIDTH", default_value_t = 64)]
    width: usize,

    /// `PUBSIZE`, in `(0, W)`
    #[arg(short, long, env = "HERRADURA_PUB_SIZE", default_value_t = 16)]
    pub_size: usize,
}

#[derive(Debug, Args)]
struct BignumArgs {
    /// Ring width `W`, any power of two from 8
    #[arg(short, long, env = "HERRADURA_WIDTH", default_value_t = 256)]
    width: usize,

    /// `PUBSIZE`, in `(0, W)`. `W / 4` if not set.
    #[arg(short, long, env = "HERRADURA_PUB_SIZE")]
    pub_size: Option<usize>,
}

fn install_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let fmt_layer = fmt::layer().with_target(true).with_line_number(true);
    let filter_layer = if verbose {
        EnvFilter::new("info,herradura_rs=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

fn main() -> Result<()> {
    let Opt {
        seed,
        verbose,
        mirrored,
        cmd,
    } = Opt::parse();
    install_tracing(verbose);

    let mut rng: Box<dyn RngCore> = match seed {
        Some(seed) => Box::new(Aes256CtrPrg::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };
    let alignment = if mirrored {
        Alignment::Mirrored
    } else {
        Alignment::Aligned
    };

    match cmd {
        Cmd::Kex(args) => {
            let params = native_params(&args, alignment)?;
            run_kex(&params, &mut *rng)?;
        }
        Cmd::Haen(args) => {
            let params = native_params(&args, alignment)?;
            let t = run_kex(&params, &mut *rng)?;
            run_haen(&params, &t, &mut *rng)?;
        }
        Cmd::Bignum(args) => {
            let pub_size = args.pub_size.map_or(PubSize::Quarter, PubSize::Fixed);
            let params = Params::<BigRing>::new(args.width, pub_size)?.with_alignment(alignment);
            run_kex(&params, &mut *rng)?;
        }
        Cmd::Suite(args) => {
            let params = native_params(&args, alignment)?;
            run_suite(&params, &mut *rng)?;
        }
    }
    Ok(())
}

fn native_params(args: &NativeArgs, alignment: Alignment) -> Result<Params<u64>> {
    Ok(Params::new(args.width, PubSize::Fixed(args.pub_size))?.with_alignment(alignment))
}

fn run_kex<R: Ring>(params: &Params<R>, rng: &mut dyn RngCore) -> Result<Transcript<R>> {
    let (i, r) = (params.pub_size(), params.key_rounds());
    let t = hkex::exchange(
        params,
        &Party::generate(params, rng),
        &Party::generate(params, rng),
    )?;
    println!("--- Herradura Key Exchange (HKEX) ---\n");
    println!("ALICE:");
    println!("{:x} A [Secret 1]", t.a);
    println!("{:x} B [Secret 2]", t.b);
    println!("{:x} D [REVOLVE(A,B,{})] ->", t.d, i);
    println!("    BOB:");
    println!("    A2 {:x} [Secret 3]", t.a2);
    println!("    B2 {:x} [Secret 4]", t.b2);
    println!(" <- D2 {:x} [REVOLVE(A2,B2,{})]", t.d2, i);
    println!("ALICE:");
    println!("{:x} FA [REVOLVE(D2,B,{}) xor A]", t.fa, r);
    println!("    BOB:");
    println!("    FA2 = FA {:x} [REVOLVE(D,B2,{}) xor A2]", t.fa2, r);
    Ok(t)
}

fn run_haen<R: Ring>(params: &Params<R>, t: &Transcript<R>, rng: &mut dyn RngCore) -> Result<()> {
    let (i, r) = (params.pub_size(), params.key_rounds());
    let p = params.random(rng);

    println!("\n--- HAEN1: keys of the same size, interactive HKEX ---\n");
    let r1 = haen::v1::round_trip(params, t, &p)?;
    println!("ALICE [PSV,A,B,{}]:", i);
    println!("{:x} PSV [FA]", t.fa);
    println!("{:x} P [plaintext]", r1.p);
    println!("{:x} E [REVOLVE(P xor PSV xor A,B,{})] ->", r1.e, i);
    println!("    BOB [A2,B2,{}]:", r);
    println!("    P2 {:x} [REVOLVE(E,B2,{}) xor A2]", r1.p2, r);

    println!("\n--- HAEN2: keys of different sizes, HKEX done by Bob ---\n");
    let r2 = haen::v2::round_trip(params, t, &p)?;
    println!("ALICE [PSV,B,{}]:", i);
    println!("{:x} PSV [shared by Bob]", t.fa);
    println!("{:x} B [shared by Bob]", t.b);
    println!("{:x} P [plaintext]", r2.p);
    println!("{:x} E [REVOLVE(P xor PSV,B,{})] ->", r2.e, i);
    println!("    BOB [A,A2,B2,{}]:", r);
    println!("    P2 {:x} [REVOLVE(E,B2,{}) xor A xor A2]", r2.p2, r);
    Ok(())
}

fn run_suite<R: Ring>(params: &Params<R>, rng: &mut dyn RngCore) -> Result<()> {
    let pair = KeyPair::generate(params, rng);
    let key = hske::Key(params.random(rng));
    let p = params.random(rng);
    println!("{:x} C [public]", pair.public.c);
    println!("{:x} C2 [private]", pair.private.c2);
    println!("{:x} P [plaintext]", p);

    println!("\n--- HSKE (symmetric key encryption)");
    let r = haen::round_trip("HSKE", params, &key, &key, &p)?;
    println!("{:x} E (Alice)", r.e);
    println!("{:x} P2 (Bob)", r.p2);

    println!("\n--- HPKS (public key signature)");
    let s = pair.private.sign(params, &p);
    println!("{:x} S (Alice)", s);
    println!("{:x} V (Bob)", pair.public.recover(params, &s));
    println!("valid: {}", pair.public.verify(params, &p, &s));

    println!("\n--- HPKE (public key encryption)");
    let e = pair.public.encrypt(params, &p);
    println!("{:x} E (Bob)", e);
    println!("{:x} P2 (Alice)", pair.private.decrypt(params, &e));
    Ok(())
}
