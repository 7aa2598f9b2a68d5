use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// `YYYY-MM` of the current month.
pub fn current_month() -> String {
    today().format("%Y-%m").to_string()
}

/// Accepts `YYYY-MM` and returns it normalized (zero-padded month).
pub fn parse_month(s: &str) -> Option<String> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m").to_string())
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

/// First and last day covered by a period: `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
pub fn period_bounds(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    let p = p.trim();

    // YYYY-MM-DD
    if let Some(d) = parse_date(p) {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Ok(first) = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d") {
        let last = last_day_of_month(first.year(), first.month())
            .ok_or_else(|| format!("Invalid period: {p}"))?;
        return Ok((first, last));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
    {
        let first = NaiveDate::from_ymd_opt(year, 1, 1);
        let last = NaiveDate::from_ymd_opt(year, 12, 31);
        if let (Some(f), Some(l)) = (first, last) {
            return Ok((f, l));
        }
    }

    Err(format!("Invalid period: {p}"))
}

/// A single period or a `start:end` range of periods.
pub fn range_bounds(r: &str) -> Result<(NaiveDate, NaiveDate), String> {
    match r.split_once(':') {
        Some((start, end)) => {
            let (s, _) = period_bounds(start)?;
            let (_, e) = period_bounds(end)?;
            if e < s {
                return Err(format!("Invalid range: {r} (end before start)"));
            }
            Ok((s, e))
        }
        None => period_bounds(r),
    }
}
