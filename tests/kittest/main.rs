mod donate;
mod harness;
mod startup;
mod wallet;
