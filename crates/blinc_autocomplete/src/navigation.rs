//! Highlight navigation over the visible option list
//!
//! All functions here are pure: they take the disabled-mask of the flat
//! option list (`true` = disabled) and the current highlight, and return
//! the next highlight. `None` means nothing is highlighted, which is also
//! the position of the input itself when `include_input_in_list` is set.
//! A returned `Some(index)` always points at an enabled option.

/// Distance covered by PageUp/PageDown
pub const PAGE_SIZE: usize = 5;

/// Scan direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the end of the list
    Next,
    /// Towards the start of the list
    Previous,
}

impl Direction {
    fn opposite(self) -> Self {
        match self {
            Direction::Next => Direction::Previous,
            Direction::Previous => Direction::Next,
        }
    }
}

/// A navigation request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The list was (re)opened or refiltered
    Reset,
    /// Home
    Start,
    /// End
    End,
    /// Relative move (±1 for arrows, ±[`PAGE_SIZE`] for paging)
    By(isize),
}

/// Why the highlight moved
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HighlightReason {
    /// Keyboard navigation
    Keyboard,
    /// Pointer hover
    Mouse,
    /// Reset after opening or refiltering
    Auto,
}

/// Flags that shape navigation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigationOptions {
    /// Reset lands on the first enabled option instead of nothing
    pub auto_highlight: bool,
    /// Clamp at the ends instead of wrapping
    pub disable_list_wrap: bool,
    /// The input is a stop between the last and the first option
    pub include_input_in_list: bool,
}

/// First enabled index at or after (`Next`) / at or before (`Previous`) `start`
pub fn valid_index(disabled: &[bool], start: usize, direction: Direction) -> Option<usize> {
    match direction {
        Direction::Next => (start..disabled.len()).find(|&i| !disabled[i]),
        Direction::Previous => {
            if disabled.is_empty() {
                return None;
            }
            let start = start.min(disabled.len() - 1);
            (0..=start).rev().find(|&i| !disabled[i])
        }
    }
}

/// Compute the next highlight
pub fn next_highlight(
    disabled: &[bool],
    current: Option<usize>,
    step: Step,
    options: NavigationOptions,
) -> Option<usize> {
    if disabled.is_empty() {
        return None;
    }
    let max = disabled.len() - 1;

    let delta = match step {
        Step::Reset => {
            return if options.auto_highlight {
                valid_index(disabled, 0, Direction::Next)
            } else {
                None
            };
        }
        Step::Start => return valid_index(disabled, 0, Direction::Next),
        Step::End => return valid_index(disabled, max, Direction::Previous),
        Step::By(0) => return current.filter(|&i| i <= max && !disabled[i]),
        Step::By(delta) => delta,
    };

    let direction = if delta > 0 {
        Direction::Next
    } else {
        Direction::Previous
    };
    let paged = delta.unsigned_abs() > 1;
    let wrap = !options.disable_list_wrap && !paged;

    let position = current.map_or(-1, |i| i as isize);
    let target = position + delta;

    let candidate = if target < 0 {
        if target == -1 && current.is_some() && options.include_input_in_list {
            return None;
        }
        if (options.disable_list_wrap && current.is_some()) || paged {
            0
        } else {
            max
        }
    } else if target as usize > max {
        if target as usize == max + 1 && options.include_input_in_list {
            return None;
        }
        if options.disable_list_wrap || paged {
            max
        } else {
            0
        }
    } else {
        target as usize
    };

    if let Some(index) = valid_index(disabled, candidate, direction) {
        return Some(index);
    }

    // Only disabled options remain in the scan direction
    if options.include_input_in_list && current.is_some() {
        return None;
    }
    if wrap {
        let restart = match direction {
            Direction::Next => 0,
            Direction::Previous => max,
        };
        valid_index(disabled, restart, direction)
    } else {
        valid_index(disabled, candidate, direction.opposite())
    }
}

/// Re-validate a highlight after the list changed underneath it
pub fn revalidate(disabled: &[bool], current: Option<usize>) -> Option<usize> {
    let index = current?;
    if index >= disabled.len() {
        return None;
    }
    valid_index(disabled, index, Direction::Next)
        .or_else(|| valid_index(disabled, index, Direction::Previous))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WRAP: NavigationOptions = NavigationOptions {
        auto_highlight: false,
        disable_list_wrap: false,
        include_input_in_list: false,
    };

    const CLAMP: NavigationOptions = NavigationOptions {
        auto_highlight: false,
        disable_list_wrap: true,
        include_input_in_list: false,
    };

    #[test]
    fn test_reset() {
        let mask = [false, false];
        assert_eq!(next_highlight(&mask, Some(1), Step::Reset, WRAP), None);
        let auto = NavigationOptions {
            auto_highlight: true,
            ..WRAP
        };
        assert_eq!(next_highlight(&mask, None, Step::Reset, auto), Some(0));
        assert_eq!(next_highlight(&[true, false], None, Step::Reset, auto), Some(1));
    }

    #[test]
    fn test_arrow_down_wraps() {
        let mask = [false, false, false];
        assert_eq!(next_highlight(&mask, None, Step::By(1), WRAP), Some(0));
        assert_eq!(next_highlight(&mask, Some(0), Step::By(1), WRAP), Some(1));
        assert_eq!(next_highlight(&mask, Some(2), Step::By(1), WRAP), Some(0));
    }

    #[test]
    fn test_arrow_up_wraps() {
        let mask = [false, false, false];
        assert_eq!(next_highlight(&mask, None, Step::By(-1), WRAP), Some(2));
        assert_eq!(next_highlight(&mask, Some(0), Step::By(-1), WRAP), Some(2));
    }

    #[test]
    fn test_disable_list_wrap_clamps() {
        let mask = [false, false, false];
        assert_eq!(next_highlight(&mask, Some(2), Step::By(1), CLAMP), Some(2));
        assert_eq!(next_highlight(&mask, Some(0), Step::By(-1), CLAMP), Some(0));
        // Entering the list from the input still works
        assert_eq!(next_highlight(&mask, None, Step::By(-1), CLAMP), Some(2));
    }

    #[test]
    fn test_skips_disabled() {
        let mask = [false, true, false, true];
        assert_eq!(next_highlight(&mask, Some(0), Step::By(1), WRAP), Some(2));
        assert_eq!(next_highlight(&mask, Some(2), Step::By(1), WRAP), Some(0));
        assert_eq!(next_highlight(&mask, Some(2), Step::By(-1), WRAP), Some(0));
        assert_eq!(next_highlight(&mask, Some(0), Step::By(-1), WRAP), Some(2));
        // Clamped: trailing disabled option is a wall
        assert_eq!(next_highlight(&mask, Some(2), Step::By(1), CLAMP), Some(2));
    }

    #[test]
    fn test_all_disabled() {
        let mask = [true, true];
        assert_eq!(next_highlight(&mask, None, Step::By(1), WRAP), None);
        assert_eq!(next_highlight(&mask, None, Step::Start, WRAP), None);
        assert_eq!(next_highlight(&mask, None, Step::End, WRAP), None);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(next_highlight(&[], Some(3), Step::By(1), WRAP), None);
        assert_eq!(next_highlight(&[], None, Step::Reset, WRAP), None);
    }

    #[test]
    fn test_home_end() {
        let mask = [true, false, false, true];
        assert_eq!(next_highlight(&mask, Some(2), Step::Start, WRAP), Some(1));
        assert_eq!(next_highlight(&mask, Some(1), Step::End, WRAP), Some(2));
    }

    #[test]
    fn test_include_input_in_list() {
        let mask = [false, false];
        let opts = NavigationOptions {
            include_input_in_list: true,
            ..WRAP
        };
        assert_eq!(next_highlight(&mask, Some(0), Step::By(-1), opts), None);
        assert_eq!(next_highlight(&mask, Some(1), Step::By(1), opts), None);
        assert_eq!(next_highlight(&mask, None, Step::By(1), opts), Some(0));
    }

    #[test]
    fn test_paging_clamps() {
        let mask = [false; 8];
        assert_eq!(next_highlight(&mask, Some(1), Step::By(PAGE_SIZE as isize), WRAP), Some(6));
        assert_eq!(next_highlight(&mask, Some(6), Step::By(PAGE_SIZE as isize), WRAP), Some(7));
        assert_eq!(next_highlight(&mask, Some(2), Step::By(-(PAGE_SIZE as isize)), WRAP), Some(0));
        let mut with_disabled_end = [false; 8];
        with_disabled_end[7] = true;
        assert_eq!(
            next_highlight(&with_disabled_end, Some(6), Step::By(PAGE_SIZE as isize), WRAP),
            Some(6)
        );
    }

    #[test]
    fn test_result_is_never_disabled() {
        let mask = [true, false, true, true, false, true];
        let steps = [Step::Reset, Step::Start, Step::End, Step::By(1), Step::By(-1), Step::By(5), Step::By(-5)];
        let flag_sets = [WRAP, CLAMP];
        for opts in flag_sets {
            for start in [None, Some(1), Some(4)] {
                for step in steps {
                    if let Some(i) = next_highlight(&mask, start, step, opts) {
                        assert!(!mask[i], "{:?} from {:?} landed on disabled {}", step, start, i);
                    }
                }
            }
        }
    }

    #[test]
    fn test_revalidate() {
        assert_eq!(revalidate(&[false, false], Some(5)), None);
        assert_eq!(revalidate(&[false, true, false], Some(1)), Some(2));
        assert_eq!(revalidate(&[false, true], Some(1)), Some(0));
        assert_eq!(revalidate(&[false], None), None);
    }
}
