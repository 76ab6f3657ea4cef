use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use rsa_dh::config::DEFAULT_PRIME_BITS;
use rsa_dh::{compute_shared_secret, generate_keys, generate_prime, hash};
use rsa_dh::{DhConfig, DhParameters, PrimeConfig, RsaConfig};

/// Generate primes, RSA keys and Diffie-Hellman secrets and print them.
#[derive(Parser, Debug)]
#[command(name = "rsa_dh", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Seed for a reproducible run (defaults to the thread-local generator).
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one probable prime.
    Prime {
        #[arg(long, default_value_t = DEFAULT_PRIME_BITS)]
        bits: u64,
    },

    /// Generate a key pair and round-trip a message.
    Rsa {
        /// Bit length of each of the two primes.
        #[arg(long, default_value_t = DEFAULT_PRIME_BITS)]
        bits: u64,

        #[arg(long, default_value = "Hi")]
        message: String,
    },

    /// Run a two-party exchange and compare the secrets.
    Dh {
        #[arg(long, default_value_t = DEFAULT_PRIME_BITS)]
        bits: u64,
    },

    /// Print the SHA-256 digest of a message.
    Hash {
        #[arg(long)]
        message: String,

        /// Digest to verify the message against.
        #[arg(long)]
        expect: Option<String>,
    },
}

fn run(cli: Cli) -> Result<()> {
    let mut rng: Box<dyn RngCore> = match cli.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };

    match cli.command {
        Command::Prime { bits } => {
            let config = PrimeConfig::default().with_bits(bits);
            let prime = generate_prime(&mut rng, &config).context("prime generation failed")?;
            println!("{}", prime);
        }
        Command::Rsa { bits, message } => {
            let config = RsaConfig::default().with_prime_bits(bits);
            let keypair = generate_keys(&mut rng, &config).context("key generation failed")?;
            let public_key = &keypair.public_key;
            let private_key = &keypair.private_key;

            println!("Public key:  ({}, {})", public_key.e, public_key.n);
            println!("Private key: ({}, {})", private_key.d, private_key.n);

            let ciphertext = public_key.encrypt(&message).context("encryption failed")?;
            println!("Encrypted: {}", ciphertext);

            let decrypted = private_key.decrypt(&ciphertext).context("decryption failed")?;
            println!("Decrypted: {}", decrypted);
        }
        Command::Dh { bits } => {
            let config = DhConfig::default().with_prime_bits(bits);
            let params = DhParameters::generate(&mut rng, &config)
                .context("parameter generation failed")?;

            let a = params.contribute(&mut rng)?;
            let b = params.contribute(&mut rng)?;

            let psk_a = compute_shared_secret(&b.public_value, &a.private_value, &params.p);
            let psk_b = compute_shared_secret(&a.public_value, &b.private_value, &params.p);

            println!("Secrets match: {}", if psk_a == psk_b { "yes" } else { "no" });
            println!("{}", psk_a);
            println!("{}", psk_b);
        }
        Command::Hash { message, expect } => {
            println!("{}", hash::digest(&message));
            if let Some(expected) = expect {
                println!("Matches: {}", hash::verify(&message, &expected));
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
