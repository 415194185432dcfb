use crate::error::Result;
use crate::models::{DayKey, StreakState, WeekIndicator, WEEK_LEN};

/// Mark which of the seven days ending at `today` fall inside the running streak.
pub fn week_indicator(today: DayKey, state: &StreakState) -> Result<WeekIndicator> {
    let mut cells = [false; WEEK_LEN];

    let (Some(start), Some(last)) = (state.start_day()?, state.last_day_key) else {
        return Ok(WeekIndicator(cells));
    };

    for (i, cell) in cells.iter_mut().enumerate() {
        let day = today.add_days(i as i64 - (WEEK_LEN as i64 - 1))?;
        *cell = start <= day && day <= last;
    }
    Ok(WeekIndicator(cells))
}
