//! Checksum test program
//!
//! This application is for testing purposes only and is not intended for practical use

use checksum::Fletcher32;
use std::{env, fs::File, io, path::Path, process};

fn main() {
    let mut args = env::args();
    let _ = args.next().unwrap();
    let args = args.collect::<Vec<_>>();

    match args.first().map(|v| v.as_str()) {
        None => usage(),
        Some("--bench") => bench(),
        Some(_) => {
            let mut failed = false;
            for path in &args {
                match checksum_of(path) {
                    Ok(checksum) => println!("{:08x}  {}", checksum, path),
                    Err(err) => {
                        eprintln!("{}: {}", path, err);
                        failed = true;
                    }
                }
            }
            if failed {
                process::exit(1);
            }
        }
    }
}

fn usage() {
    let mut args = env::args_os();
    let arg = args.next().unwrap();
    let path = Path::new(&arg);
    let lpc = path.file_name().unwrap();
    eprintln!("{} [--bench | FILE...]", lpc.to_str().unwrap());
    process::exit(1);
}

fn checksum_of(path: &str) -> io::Result<u32> {
    let mut hasher = Fletcher32::new();
    if path == "-" {
        io::copy(&mut io::stdin().lock(), &mut hasher)?;
    } else {
        io::copy(&mut File::open(path)?, &mut hasher)?;
    }
    Ok(hasher.finalize())
}

fn bench() {
    let time0 = std::time::Instant::now();
    while time0.elapsed().as_secs_f64() < 1.0 {
        stabilize();
    }

    let src_size = 0x100000;
    let input = random_bytes(src_size);

    for _ in 0..5 {
        let times = 20;

        let time0 = std::time::Instant::now();
        let mut batched = 0;
        for _ in 0..times {
            batched = Fletcher32::checksum(&input);
        }
        let elapsed_batched = time0.elapsed();

        // one byte per update reduces after every byte
        let time0 = std::time::Instant::now();
        let mut bytewise = 0;
        for _ in 0..times {
            let mut hasher = Fletcher32::new();
            for byte in input.chunks(1) {
                hasher.update(byte);
            }
            bytewise = hasher.finalize();
        }
        let elapsed_bytewise = time0.elapsed();

        assert_eq!(batched, bytewise, "batched and bytewise checksums differ");

        let mib = (src_size * times) as f64 / (1024.0 * 1024.0);
        println!(
            "times {}: {:08x} batched: {:.03}s {:.01}MiB/s, bytewise: {:.03}s {:.01}MiB/s",
            times,
            batched,
            elapsed_batched.as_secs_f64(),
            mib / elapsed_batched.as_secs_f64(),
            elapsed_bytewise.as_secs_f64(),
            mib / elapsed_bytewise.as_secs_f64(),
        );
    }
}

fn random_bytes(limit: usize) -> Vec<u8> {
    use rand::RngCore;
    let mut rng = rand::rng();
    let mut v = vec![0; limit];
    rng.fill_bytes(&mut v);
    v
}

fn stabilize() {
    use rand::RngCore;
    let mut rng = rand::rng();
    let len = 0x1000 + (rng.next_u32() as usize & 0xfffff);
    let mut v = vec![0; len];
    rng.fill_bytes(&mut v);
    let _ = Fletcher32::checksum(&v);
}
