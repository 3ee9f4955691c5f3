use ptf_miner::{mine, MineConfig, VecTransactionSource};

fn main() {
    env_logger::init();

    let transactions = vec![
        vec!["c", "e", "a", "b", "f"],
        vec!["a", "c", "g"],
        vec!["e"],
        vec!["a", "c", "e", "g", "d"],
        vec!["a", "c", "e", "g"],
        vec!["e"],
        vec!["a", "c", "e", "b", "f"],
        vec!["a", "c", "d"],
        vec!["a", "c", "e", "g"],
        vec!["a", "c", "e", "g"],
    ];

    let mut source = VecTransactionSource::new(transactions);
    let config = MineConfig::sequential(5).expect("k must be >= 1");
    let results = mine(&mut source, &config).expect("mining a well-formed in-memory source cannot fail");

    println!("The number of results: {}", results.len());
    for (itemset, support) in results.iter() {
        println!("{:?} {}", itemset, support);
    }
}
