//! Integration tests for per-episode HP extraction

use hokstats::table::Cell;
use hokstats::{EpisodeHpExtractor, EpisodeRecord, Table, UnterminatedPolicy};

use crate::helpers::load_fixture;

#[test]
fn extracts_final_hp_per_episode() {
    let records = EpisodeHpExtractor::default().extract(&load_fixture("cout.txt"));

    assert_eq!(
        records,
        vec![
            EpisodeRecord::new(0, 3100),
            EpisodeRecord::new(1, 2480),
            EpisodeRecord::new(2, 4000),
            EpisodeRecord::new(3, 1200),
            EpisodeRecord::new(4, -1),
            EpisodeRecord::new(5, 3000),
        ]
    );
}

#[test]
fn dropped_and_sentinel_policies_differ_only_on_unterminated_episodes() {
    let log = "Cur episode 5\nCur episode 6\nMonster HP = 40\nGame Over\nCur episode 7\n";

    let dropped = EpisodeHpExtractor::new("Game Over", UnterminatedPolicy::Drop).extract(log);
    let kept = EpisodeHpExtractor::new("Game Over", UnterminatedPolicy::Sentinel).extract(log);

    assert_eq!(dropped, vec![EpisodeRecord::new(6, 40)]);
    assert_eq!(
        kept,
        vec![
            EpisodeRecord::new(5, -1),
            EpisodeRecord::new(6, 40),
            EpisodeRecord::new(7, -1),
        ]
    );
}

#[test]
fn table_sorts_out_of_order_episodes() {
    let log = "Cur episode 9\nMonster HP = 1\nGame Over\nCur episode 2\nMonster HP = 5\nGame Over\n";
    let records = EpisodeHpExtractor::default().extract(log);

    let table = Table::from_records(&records);

    assert_eq!(
        table.rows(),
        [
            vec![Cell::Int(2), Cell::Int(5)],
            vec![Cell::Int(9), Cell::Int(1)]
        ]
    );
}

#[test]
fn custom_terminator() {
    let extractor = EpisodeHpExtractor::new("EPISODE END", UnterminatedPolicy::Drop);
    let log = "Cur episode 1\nMonster HP = 12\nGame Over\nMonster HP = 9\nEPISODE END\n";
    let records = extractor.extract(log);
    assert_eq!(records, vec![EpisodeRecord::new(1, 9)]);
}

#[test]
fn invalid_byte_inside_hp_value_is_dropped() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("cout.txt");
    std::fs::write(&path, b"Cur episode 1\nMonster HP = 1\xff2\nGame Over\n").unwrap();

    let log = hokstats::read_log(&path).unwrap();
    let records = EpisodeHpExtractor::default().extract(log.text());

    assert_eq!(records, vec![EpisodeRecord::new(1, 12)]);
}
