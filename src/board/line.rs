use super::Cell;

/// Push every tile in a lane toward index 0, merging each adjacent equal
/// pair into a doubled tile. A cell produced by a merge never merges again
/// in the same pass. Returns the number of occupied cells after the push.
pub fn compact_start(cells: &mut [Cell]) -> usize {
    // Find first occupied cell
    let Some(current) = cells
        .iter()
        .enumerate()
        .find_map(|(i, c)| c.is_some().then_some(i))
    else {
        return 0;
    };

    let mut last = 0; // Write ptr
    cells.swap(last, current);

    for current in current + 1..cells.len() {
        match cells[current] {
            None => continue,
            Some(value) if cells[last] == Some(value) => {
                cells[last] = Some(value * 2);
                cells[current] = None;
                last += 1;
            }
            Some(_) => {
                if cells[last].is_some() {
                    last += 1;
                }
                cells.swap(last, current);
            }
        }
    }

    last + usize::from(cells[last].is_some())
}

/// Push toward the far end: reverse, compact toward the start, reverse.
pub fn compact_end(cells: &mut [Cell]) {
    cells.reverse();
    compact_start(cells);
    cells.reverse();
}
