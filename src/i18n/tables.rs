use super::LocaleTable;

pub static EN: LocaleTable = LocaleTable {
    tag: "en",
    weekdays: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    every_minutes: "every {n}m",
    every_hours: "every {n}h",
    daily_at: "daily at {time}",
    monthly_at: "on day {day} at {time}",
    weekly_at: "{days} {time}",
    list_separator: ", ",
    datetime_format: "%b %-d, %Y %H:%M",
    just_now: "just now",
    seconds_ago: ("{n} second ago", "{n} seconds ago"),
    minutes_ago: ("{n} minute ago", "{n} minutes ago"),
    hours_ago: ("{n} hour ago", "{n} hours ago"),
    days_ago: ("{n} day ago", "{n} days ago"),
};

pub static ZH: LocaleTable = LocaleTable {
    tag: "zh",
    weekdays: ["周日", "周一", "周二", "周三", "周四", "周五", "周六"],
    every_minutes: "每 {n} 分钟",
    every_hours: "每 {n} 小时",
    daily_at: "每天 {time}",
    monthly_at: "每月 {day} 日 {time}",
    weekly_at: "{days} {time}",
    list_separator: ", ",
    datetime_format: "%Y年%-m月%-d日 %H:%M",
    just_now: "刚刚",
    seconds_ago: ("{n} 秒前", "{n} 秒前"),
    minutes_ago: ("{n} 分钟前", "{n} 分钟前"),
    hours_ago: ("{n} 小时前", "{n} 小时前"),
    days_ago: ("{n} 天前", "{n} 天前"),
};
