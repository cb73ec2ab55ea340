//! Admin reporting. Read-only; only COMPLETED orders count towards revenue.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

use crate::{
    dto::dashboard::{
        DashboardData, DashboardQuery, DaySales, MonthlyRevenue, RecentOrder, WalletData,
        WalletQuery,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    response::{ApiResponse, Meta},
    state::AppState,
};

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const RECENT_ORDER_LIMIT: i64 = 4;

fn first_of_month(year: i32, month: u32) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::BadRequest(format!("invalid month {month}/{year}")))
}

fn days_in_month(first: NaiveDate) -> AppResult<i64> {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    let next = first_of_month(y, m)?;
    Ok((next - first).num_days())
}

/// Sunday-to-Saturday window of the "current week" of `month/year`, as
/// `[start, end)`. The week index comes from today's day-of-month, capped at the
/// last week of the target month. Week one may start in the previous month.
pub fn week_window(month: u32, year: i32, today: NaiveDate) -> AppResult<(NaiveDate, NaiveDate)> {
    if !(1..=12).contains(&month) {
        return Err(AppError::BadRequest("month must be between 1 and 12".into()));
    }
    let first = first_of_month(year, month)?;
    let offset = i64::from(first.weekday().num_days_from_sunday());

    let current_week = (i64::from(today.day()) + offset + 6) / 7;
    let last_week = (days_in_month(first)? + offset + 6) / 7;
    let week = current_week.min(last_week);

    let start = first + Duration::days((week - 1) * 7 - offset);
    Ok((start, start + Duration::days(7)))
}

/// Percent of the busiest day, with the divisor floored at 1.
pub fn day_percentages(amounts: [f64; 7]) -> Vec<DaySales> {
    let max = amounts.iter().copied().fold(1.0_f64, f64::max);
    DAY_NAMES
        .iter()
        .zip(amounts)
        .map(|(day, amount)| DaySales {
            day: (*day).to_string(),
            amount,
            percentage: (amount / max * 100.0).round() as i64,
        })
        .collect()
}

/// Twelve `Jan..Dec` buckets from `(month 1-12, amount)` rows.
pub fn monthly_buckets(rows: &[(i32, f64)]) -> Vec<MonthlyRevenue> {
    let mut amounts = [0.0_f64; 12];
    for (month, amount) in rows {
        if let Some(slot) = usize::try_from(*month - 1).ok().and_then(|i| amounts.get_mut(i)) {
            *slot += amount;
        }
    }
    MONTH_NAMES
        .iter()
        .zip(amounts)
        .map(|(month, amount)| MonthlyRevenue {
            month: (*month).to_string(),
            amount,
        })
        .collect()
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

pub async fn get_dashboard(
    state: &AppState,
    user: &AuthUser,
    query: DashboardQuery,
) -> AppResult<ApiResponse<DashboardData>> {
    ensure_admin(user)?;
    let (week_start, week_end) = week_window(query.month, query.year, Utc::now().date_naive())?;

    let (total_partners,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM partners WHERE is_visible = TRUE")
            .fetch_one(&state.pool)
            .await?;

    let (total_products,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM products WHERE is_visible = TRUE")
            .fetch_one(&state.pool)
            .await?;

    let (revenue,): (f64,) = sqlx::query_as(
        "SELECT COALESCE(SUM(total_price), 0)::float8 FROM orders WHERE payment_status = 'COMPLETED'",
    )
    .fetch_one(&state.pool)
    .await?;

    let by_day: Vec<(i32, f64)> = sqlx::query_as(
        r#"
        SELECT EXTRACT(DOW FROM created_at AT TIME ZONE 'UTC')::int AS dow,
               COALESCE(SUM(total_price), 0)::float8 AS amount
        FROM orders
        WHERE payment_status = 'COMPLETED'
          AND created_at >= $1 AND created_at < $2
        GROUP BY dow
        "#,
    )
    .bind(start_of_day(week_start))
    .bind(start_of_day(week_end))
    .fetch_all(&state.pool)
    .await?;

    let mut amounts = [0.0_f64; 7];
    for (dow, amount) in by_day {
        if let Some(slot) = usize::try_from(dow).ok().and_then(|i| amounts.get_mut(i)) {
            *slot += amount;
        }
    }

    let recent_orders = sqlx::query_as::<_, RecentOrder>(
        r#"
        SELECT o.id, o.serial_number, o.total_price, o.created_at,
               u.first_name, u.last_name, u.email
        FROM orders o
        JOIN users u ON u.id = o.user_id
        WHERE o.payment_status = 'COMPLETED'
        ORDER BY o.created_at DESC
        LIMIT $1
        "#,
    )
    .bind(RECENT_ORDER_LIMIT)
    .fetch_all(&state.pool)
    .await?;

    tracing::debug!(%week_start, %week_end, "dashboard aggregated");

    Ok(ApiResponse::success(
        "Dashboard",
        DashboardData {
            total_partners,
            total_products,
            revenue,
            sales_analytics: day_percentages(amounts),
            recent_orders,
        },
        Some(Meta::empty()),
    ))
}

pub async fn get_wallet(
    state: &AppState,
    user: &AuthUser,
    query: WalletQuery,
) -> AppResult<ApiResponse<WalletData>> {
    ensure_admin(user)?;
    let year_start = first_of_month(query.year, 1)?;
    let next_year_start = first_of_month(query.year + 1, 1)?;

    let (total_products,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM products WHERE is_visible = TRUE")
            .fetch_one(&state.pool)
            .await?;

    let (total_revenue, total_order): (f64, i64) = sqlx::query_as(
        r#"
        SELECT COALESCE(SUM(total_price), 0)::float8, COUNT(*)
        FROM orders
        WHERE payment_status = 'COMPLETED'
        "#,
    )
    .fetch_one(&state.pool)
    .await?;

    let by_month: Vec<(i32, f64)> = sqlx::query_as(
        r#"
        SELECT EXTRACT(MONTH FROM created_at AT TIME ZONE 'UTC')::int AS month,
               COALESCE(SUM(total_price), 0)::float8 AS amount
        FROM orders
        WHERE payment_status = 'COMPLETED'
          AND created_at >= $1 AND created_at < $2
        GROUP BY month
        "#,
    )
    .bind(start_of_day(year_start))
    .bind(start_of_day(next_year_start))
    .fetch_all(&state.pool)
    .await?;

    let monthly_revenue = monthly_buckets(&by_month);
    let yearly_revenue = monthly_revenue.iter().map(|m| m.amount).sum();

    Ok(ApiResponse::success(
        "Wallet",
        WalletData {
            total_products,
            total_revenue,
            total_order,
            yearly_revenue,
            monthly_revenue,
        },
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_is_the_sunday_week_containing_today() {
        // October 2026 starts on a Thursday.
        let (start, end) = week_window(10, 2026, date(2026, 10, 19)).unwrap();
        assert_eq!(start, date(2026, 10, 18));
        assert_eq!(end, date(2026, 10, 25));
    }

    #[test]
    fn first_week_can_begin_in_the_previous_month() {
        let (start, end) = week_window(10, 2026, date(2026, 10, 2)).unwrap();
        assert_eq!(start, date(2026, 9, 27));
        assert_eq!(end, date(2026, 10, 4));
    }

    #[test]
    fn week_is_capped_at_the_last_week_of_a_short_month() {
        // February 2026 starts on a Sunday and has exactly four weeks.
        let (start, _) = week_window(2, 2026, date(2026, 3, 31)).unwrap();
        assert_eq!(start, date(2026, 2, 22));
    }

    #[test]
    fn out_of_range_month_is_rejected() {
        assert!(matches!(
            week_window(13, 2026, date(2026, 1, 1)),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            week_window(0, 2026, date(2026, 1, 1)),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn percentages_are_relative_to_the_busiest_day() {
        let sales = day_percentages([0.0, 50.0, 100.0, 0.0, 0.0, 0.0, 25.0]);
        let pct: Vec<i64> = sales.iter().map(|d| d.percentage).collect();
        assert_eq!(pct, vec![0, 50, 100, 0, 0, 0, 25]);
        assert_eq!(sales[0].day, "Sun");
        assert_eq!(sales[6].day, "Sat");
    }

    #[test]
    fn empty_week_has_zero_percentages() {
        let sales = day_percentages([0.0; 7]);
        assert!(sales.iter().all(|d| d.percentage == 0));

        // Divisor never drops below one.
        let sales = day_percentages([0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(sales[0].percentage, 50);
    }

    #[test]
    fn monthly_buckets_fill_all_twelve_months() {
        let buckets = monthly_buckets(&[(1, 10.0), (12, 5.5), (1, 2.0), (13, 99.0)]);
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0].month, "Jan");
        assert_eq!(buckets[0].amount, 12.0);
        assert_eq!(buckets[11].amount, 5.5);
        assert_eq!(buckets[5].amount, 0.0);
    }
}
