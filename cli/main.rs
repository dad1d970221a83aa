// Simple dnslink resolver command line.
// dnslink [@server] [+udp|+tcp] [+depth=N] [+underscore] [+verbose] {domain}...
mod util;

use dnslink::clients::{DnsLookup, TcpClient, UdpClient};
use dnslink::{LookupTxt, Resolver, UnderscoreLookup, DEFAULT_DEPTH_LIMIT};
use std::env;
use std::process;
use std::str::FromStr;
use strum_macros::{Display, EnumString};

const USAGE: &str = "dnslink - resolve dns links in TXT records

USAGE
    dnslink [@server] [+udp|+tcp] [+depth=N] [+underscore] [+verbose] <domain>...

EXAMPLE
    > dnslink blog.ipfs.io
    /ipns/ipfs.io/blog

    > dnslink ipfs.io blog.ipfs.io
    ipfs.io: /ipfs/QmR7tiySn6vFHcEjBeZNtYGAFh735PJHfEMdVEycj9jAPy
    blog.ipfs.io: /ipns/ipfs.io/blog

    > dnslink foo.bar
    error: no dnslink record found for foo.bar
";

#[derive(Debug, Display, EnumString, PartialEq)]
#[strum(serialize_all = "lowercase")]
enum Transport {
    Udp,
    Tcp,
}

// A simple type alias so as to DRY.
type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug)]
struct Args {
    transport: Transport,
    servers: Vec<String>,

    /// Maximum number of redirects to follow.
    depth: usize,

    /// Query `_dnslink.<domain>` before `<domain>`.
    underscore: bool,

    verbose: bool,
    help: bool,

    domains: Vec<String>,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Args> {
    let mut result = Args {
        transport: Transport::Udp,
        servers: Vec::new(),
        depth: DEFAULT_DEPTH_LIMIT,
        underscore: false,
        verbose: false,
        help: false,
        domains: Vec::new(),
    };

    for arg in args {
        if arg == "-h" || arg == "--help" {
            result.help = true;
            continue;
        }

        if let Some(server) = arg.strip_prefix('@') {
            result.servers.push(server.to_string());
            continue;
        }

        let flag = match arg.strip_prefix('+') {
            Some(flag) => flag,
            None => {
                result.domains.push(arg);
                continue;
            }
        };

        if let Some(depth) = flag.strip_prefix("depth=") {
            result.depth = depth
                .parse()
                .map_err(|e| format!("Invalid depth '{}': {}", depth, e))?;
        } else if flag == "underscore" {
            result.underscore = true;
        } else if flag == "verbose" {
            result.verbose = true;
        } else if let Ok(transport) = Transport::from_str(flag) {
            result.transport = transport;
        } else {
            return Err(format!("Unknown flag: {}", arg).into());
        }
    }

    Ok(result)
}

fn main() {
    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprint!("{}", USAGE);
            process::exit(1);
        }
    };

    if args.help || args.domains.is_empty() {
        print!("{}", USAGE);
        return;
    }

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let servers = util::server_addrs(&args.servers)?;
    log::debug!("using {} over {}", util::join(&servers), args.transport);

    match args.transport {
        Transport::Udp => resolve_with(DnsLookup::new(UdpClient::new(&servers[..])?), args),
        Transport::Tcp => resolve_with(DnsLookup::new(TcpClient::new(&servers[..])?), args),
    }
}

fn resolve_with<L: LookupTxt>(lookup: L, args: &Args) -> Result<()> {
    if args.underscore {
        print_links(&Resolver::with_lookup(UnderscoreLookup::new(lookup)), args)
    } else {
        print_links(&Resolver::with_lookup(lookup), args)
    }
}

// A single domain prints just the path, and fails on error. With multiple
// domains errors are printed as output, and do not fail the entire process.
fn print_links<L: LookupTxt>(resolver: &Resolver<L>, args: &Args) -> Result<()> {
    if let [domain] = args.domains.as_slice() {
        println!("{}", resolver.resolve_n(domain, args.depth)?);
        return Ok(());
    }

    for domain in &args.domains {
        let result = resolver.resolve_n(domain, args.depth);
        println!("{}", util::format_line(domain, &result));
    }

    Ok(())
}
