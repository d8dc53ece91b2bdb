//! Cross-module test harnesses

mod timers;
