use chain_table::ChainTable;
use chain_table::DEFAULT_BUCKET_COUNT;
use chain_table::strategy::Modular;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    /// Number of sequential integer keys to insert.
    #[arg(short = 'n', long = "entries", default_value_t = 106)]
    entries: u64,

    /// Number of buckets for the table and its modular strategy.
    #[arg(short = 'b', long = "buckets", default_value_t = DEFAULT_BUCKET_COUNT)]
    buckets: usize,
}

fn main() {
    let args = Args::parse();

    println!("Creating a {}-bucket table", args.buckets);
    let mut table = ChainTable::with_buckets(args.buckets, Modular::new(args.buckets));

    for key in 0..args.entries {
        table.insert(key, format!("{key}"));
    }
    println!("Inserted {} entries", table.len());

    let visited = table.traverse(|_| 1);
    println!("Traverse visited {visited} entries");
    println!();

    table.chain_stats().print();

    println!();
    println!("Chain occupancy:");
    for (bucket, len) in table.chain_histogram().into_iter().enumerate() {
        println!("{bucket:>4} | {}", "#".repeat(len));
    }
}
