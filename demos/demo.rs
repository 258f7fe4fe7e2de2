use rb_interval_tree::{Interval, IntervalTree, Result};

fn print_intervals<'a>(title: &str, intervals: impl IntoIterator<Item = &'a Interval<i32>>) {
    println!("{}:", title);
    for interval in intervals {
        println!("{}", interval);
    }
    println!();
}

fn main() -> Result<()> {
    env_logger::init();

    let mut tree = IntervalTree::new();
    for (low, high) in [(20, 30), (40, 60), (70, 90), (60, 70), (40, 90), (80, 90)] {
        tree.insert(Interval::new(low, high)?);
    }

    let wanted_interval = Interval::new(50, 80)?;
    let wanted_point = 50;

    print_intervals("All intervals", &tree);
    print_intervals(
        &format!("Overlapping intervals for {}", wanted_interval),
        tree.find_overlapping_intervals(&wanted_interval),
    );
    print_intervals(
        &format!("Inner intervals for {}", wanted_interval),
        tree.find_inner_intervals(&wanted_interval),
    );
    print_intervals(
        &format!("Outer intervals for {}", wanted_interval),
        tree.find_outer_intervals(&wanted_interval),
    );
    print_intervals(
        &format!("Intervals contain a point value of {}", wanted_point),
        tree.find_intervals_contain_point(&wanted_point),
    );

    Ok(())
}
