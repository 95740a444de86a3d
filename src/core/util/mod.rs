pub mod month_util;
