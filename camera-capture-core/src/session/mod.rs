pub mod viewfinder;
