use std::hint::black_box;

use bencher::{chunk_stream, TestCase};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use dechunk::{BodyItem, ChunkedBodyDecoder, ChunkedDecoder};
use tokio_util::bytes::BytesMut;
use tokio_util::codec::Decoder;

fn create_test_cases() -> Vec<TestCase> {
    vec![
        TestCase::small("tiny_chunks", chunk_stream(&vec![b'a'; 16 * 1024], 64)),
        TestCase::normal("medium_chunks", chunk_stream(&vec![b'a'; 256 * 1024], 4096)),
        TestCase::large("single_large_chunk", chunk_stream(&vec![b'a'; 1024 * 1024], 1024 * 1024)),
    ]
}

fn benchmark_chunked_decoder(criterion: &mut Criterion) {
    let test_cases = create_test_cases();
    let mut group = criterion.benchmark_group("chunked_decoder");

    for case in test_cases {
        group.throughput(Throughput::Bytes(case.payload().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &case, |b, case| {
            b.iter_batched_ref(
                || case.payload().to_vec(),
                |buf| {
                    let mut decoder = ChunkedDecoder::new();
                    let decoded = decoder.decode(buf).expect("input should be a valid chunked stream");
                    black_box(decoded);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn benchmark_chunked_body_decoder(criterion: &mut Criterion) {
    let test_cases = create_test_cases();
    let mut group = criterion.benchmark_group("chunked_body_decoder");

    for case in test_cases {
        group.throughput(Throughput::Bytes(case.payload().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &case, |b, case| {
            b.iter_batched_ref(
                || BytesMut::from(case.payload()),
                |bytes_mut| {
                    let mut decoder = ChunkedBodyDecoder::new();
                    loop {
                        match decoder.decode(bytes_mut).expect("input should be a valid chunked stream") {
                            Some(BodyItem::Chunk(bytes)) => {
                                black_box(bytes);
                            }
                            Some(BodyItem::Eof) => break,
                            None => break,
                        }
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(decoder, benchmark_chunked_decoder, benchmark_chunked_body_decoder);
criterion_main!(decoder);
