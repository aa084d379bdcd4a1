//! Monthly and yearly sums.

use incident_cluster_core::{
    aggregate::{harmed_monthly, prop_value_by_year, prop_value_monthly, unique_counts, MonthlyTotals},
    dataset::IncidentTable,
    types::MonthKey,
};

const FIXTURE: &str = "\
iyear,imonth,nkill,nwound,propvalue,country_txt
1970,1,2,3,100,Peru
1970,1,1,,50,Peru
1970,1,,4,,Chile
1970,2,0,0,-99,Peru
1970,3,10,20,1000,Chile
1971,1,5,5,7,Peru
1970,0,9,9,9,Chile
";

fn table() -> IncidentTable {
    IncidentTable::from_reader(FIXTURE.as_bytes()).expect("fixture parses")
}

#[test]
fn harmed_sums_kills_and_wounds_for_the_month() {
    let t = table();
    // kills 2+1 (blank skipped), wounds 3+4 (blank skipped)
    assert_eq!(harmed_monthly(&t, 1970, 1), 10.0);
    assert_eq!(harmed_monthly(&t, 1970, 3), 30.0);
    assert_eq!(harmed_monthly(&t, 1971, 1), 10.0);
}

#[test]
fn harmed_is_zero_for_empty_month() {
    let t = table();
    assert_eq!(harmed_monthly(&t, 1970, 2), 0.0);
    assert_eq!(harmed_monthly(&t, 1970, 12), 0.0);
    assert_eq!(harmed_monthly(&t, 1999, 1), 0.0);
}

#[test]
fn prop_value_sums_the_month_skipping_blanks() {
    let t = table();
    assert_eq!(prop_value_monthly(&t, 1970, 1), 150.0);
    assert_eq!(prop_value_monthly(&t, 1970, 3), 1000.0);
    assert_eq!(prop_value_monthly(&t, 1970, 12), 0.0);
}

#[test]
fn prop_value_keeps_negative_codes() {
    assert_eq!(prop_value_monthly(&table(), 1970, 2), -99.0);
}

#[test]
fn prop_value_by_year_covers_every_month_including_unknown() {
    // 150 - 99 + 1000 + 9 (month 0)
    assert_eq!(prop_value_by_year(&table(), 1970), 1060.0);
    assert_eq!(prop_value_by_year(&table(), 1971), 7.0);
}

#[test]
fn monthly_index_agrees_with_direct_sums() {
    let t = table();
    let totals = MonthlyTotals::build(&t);
    for year in 1969..=1972 {
        for month in 0..=12 {
            assert_eq!(totals.harmed(year, month), harmed_monthly(&t, year, month));
            assert_eq!(totals.prop_value(year, month), prop_value_monthly(&t, year, month));
        }
    }
    let jan = totals.get(MonthKey::new(1970, 1));
    assert_eq!((jan.killed, jan.wounded), (3.0, 7.0));
}

#[test]
fn unique_counts_tallies_raw_values() {
    let counts = unique_counts(&table(), "country_txt").unwrap();
    assert_eq!(counts.get("Peru"), Some(&4));
    assert_eq!(counts.get("Chile"), Some(&3));
    assert_eq!(counts.len(), 2);
}

#[test]
fn unique_counts_rejects_unknown_column() {
    assert!(unique_counts(&table(), "gname").is_err());
}

#[test]
fn unique_counts_merges_equal_numbers_and_na_markers() {
    let csv = "iyear,imonth,nkill,nwound,propvalue\n\
               1990,1,1,0,0\n\
               1990,1,1.0,0,0\n\
               1990,1, 1 ,0,0\n\
               1990,1,2.5,0,0\n\
               1990,1,,0,0\n\
               1990,1,-nan,0,0\n\
               1990,1,#N/A,0,0\n";
    let t = IncidentTable::from_reader(csv.as_bytes()).unwrap();
    let counts = unique_counts(&t, "nkill").unwrap();
    assert_eq!(counts.get("1"), Some(&3));
    assert_eq!(counts.get("2.5"), Some(&1));
    assert_eq!(counts.get("NaN"), Some(&3));
    assert_eq!(counts.len(), 3);
}
